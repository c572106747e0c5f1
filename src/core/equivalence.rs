/// Substring pairs treated as the same solution, e.g. a particular solution
/// and its scaled general form.
pub const EQUIVALENT_PAIRS: [(&str, &str); 5] = [
    ("sin(x)", "A*sin(x)"),
    ("cos(x)", "B*cos(x)"),
    ("e^(-x)", "C*e^(-x)"),
    ("e^(2x)", "C1*e^(2x)"),
    ("x*e^(2x)", "C2*x*e^(2x)"),
];

/// Whether two normalized solutions count as equivalent.
///
/// Containment is enough: one side holding the first half of a pair while the
/// other holds the second half, in either direction. This is a whitelist, not
/// algebra, so it misses most true equivalences and accepts some false ones.
pub fn is_equivalent(first: &str, second: &str) -> bool {
    EQUIVALENT_PAIRS.iter().any(|(a, b)| {
        (first.contains(a) && second.contains(b)) || (first.contains(b) && second.contains(a))
    })
}
