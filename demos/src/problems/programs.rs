//! The running example: a choice between `p` and `q`, each implying `r`.
//!
//! ```text
//! p :- not q.
//! q :- not p.
//! r :- p.
//! r :- q.
//! ```
//!
//! Its stable models are `{p, r}` and `{q, r}`.

use qasp::Model;

/// Source text of the program.
pub const CHOICE_PROGRAM: &str = "
    p :- not q.
    q :- not p.
    r :- p.
    r :- q.
";

/// Route fixed before counting in the navigation demo: `p` is true.
pub const NAVIGATION_ROUTE: [(&str, bool); 1] = [("p", true)];

/// Variable order `p < q < r`.
pub fn choice_variables() -> Vec<String> {
    ["p", "q", "r"].map(String::from).to_vec()
}

/// Stable models of [`CHOICE_PROGRAM`].
pub fn choice_models() -> Vec<Model> {
    vec![
        [("p", true), ("q", false), ("r", true)].into_iter().collect(),
        [("p", false), ("q", true), ("r", true)].into_iter().collect(),
    ]
}

/// Per-variable probabilities of the navigation initializer.
///
/// Atoms on the route are pinned to their value; the rest stay uniform.
pub fn navigation_weights() -> Vec<f64> {
    choice_variables()
        .iter()
        .map(|var| {
            NAVIGATION_ROUTE
                .iter()
                .find(|(atom, _)| *atom == var.as_str())
                .map_or(0.5, |&(_, value)| if value { 1.0 } else { 0.0 })
        })
        .collect()
}

/// Scale turning `sin²(p/2)` into a model count after navigating `k` of
/// `n` atoms: `2^(n-k)` free assignments, times 2 for augmentation.
pub fn navigation_scale(n: usize, k: usize) -> f64 {
    2f64.powi((n - k) as i32) * 2.0
}
