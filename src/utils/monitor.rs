use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
#[cfg(feature = "cli")]
use std::sync::Mutex;
use std::time::Duration;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Counters for requests served, shared between the HTTP middleware and the
/// periodic monitor.
#[derive(Debug, Default)]
pub struct RequestStats {
    requests: AtomicU64,
    errors: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestStatsSnapshot {
    pub requests: u64,
    pub errors: u64,
    /// Percentage of requests answered with a 5xx status.
    pub error_rate: f64,
    pub average_response_time: Duration,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished request. Any status >= 500 counts as an error.
    pub fn record(&self, status_code: u16, elapsed: Duration) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if status_code >= 500 {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.total_latency_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RequestStatsSnapshot {
        let requests = self.requests.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        let total_micros = self.total_latency_micros.load(Ordering::Relaxed);

        let (error_rate, average_response_time) = if requests > 0 {
            (
                errors as f64 / requests as f64 * 100.0,
                Duration::from_micros(total_micros / requests),
            )
        } else {
            (0.0, Duration::ZERO)
        };

        RequestStatsSnapshot {
            requests,
            errors,
            error_rate,
            average_response_time,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub memory_usage_percent: f32,
    pub peak_memory_mb: u64,
    pub uptime: Duration,
}

/// Process resource snapshots for the analyzer server.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Arc<Mutex<System>>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory: Arc<Mutex<u64>>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("⚠️ Cannot resolve current PID, monitoring disabled: {}", e);
                None
            }
        };

        // 初始刷新
        system.refresh_all();

        Self {
            system: Arc::new(Mutex::new(system)),
            pid,
            start_time: Instant::now(),
            peak_memory: Arc::new(Mutex::new(0)),
            enabled: enabled && pid.is_some(),
        }
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(self.pid?)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_memory = system.total_memory() / 1024 / 1024;
        let memory_percent = if total_memory > 0 {
            (memory_mb as f32 / total_memory as f32) * 100.0
        } else {
            0.0
        };

        // 更新峰值記憶體
        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(SystemStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            memory_usage_percent: memory_percent,
            peak_memory_mb: *peak,
            uptime: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Uptime: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.memory_usage_percent,
                stats.peak_memory_mb,
                stats.uptime
            );
        }
    }

    /// Logs process and request statistics together.
    pub fn log_performance(&self, requests: &RequestStats) {
        let Some(stats) = self.get_stats() else {
            return;
        };
        let served = requests.snapshot();
        tracing::info!(
            "📊 Performance Metrics - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Uptime: {:?}, \
             Requests: {}, Errors: {} ({:.1}%), Avg response: {:.3}s",
            stats.cpu_usage,
            stats.memory_usage_mb,
            stats.memory_usage_percent,
            stats.peak_memory_mb,
            stats.uptime,
            served.requests,
            served.errors,
            served.error_rate,
            served.average_response_time.as_secs_f64()
        );
    }

    /// Logs a snapshot every `interval` until the returned task is aborted.
    pub fn spawn_periodic(
        self,
        interval: Duration,
        requests: Arc<RequestStats>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.log_performance(&requests);
            }
        }))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_performance(&self, _requests: &RequestStats) {}

    pub fn spawn_periodic(
        self,
        _interval: Duration,
        _requests: Arc<RequestStats>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        None
    }

    pub fn is_enabled(&self) -> bool {
        false
    }
}
