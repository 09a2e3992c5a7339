use crate::model::step::Step;

/// Advisory checks over the ordering of a step sequence.
///
/// Steps without a `stepNumber` (parsed as 0) are skipped.
pub(crate) fn sequence_warnings(steps: &[Step]) -> Vec<String> {
    if steps.is_empty() {
        return vec!["Step sequence is empty: nothing to visualize".to_string()];
    }

    let mut out = Vec::new();
    let mut seen: Vec<(u64, usize)> = Vec::new();
    let mut prev: Option<(u64, usize)> = None;
    for (i, step) in steps.iter().enumerate() {
        let n = step.step_number;
        if n == 0 {
            continue;
        }
        if let Some(&(_, first)) = seen.iter().find(|(m, _)| *m == n) {
            out.push(format!(
                "Duplicate stepNumber {n} at steps {first} and {i}"
            ));
        } else if let Some((p, pi)) = prev {
            if n < p {
                out.push(format!(
                    "stepNumber {n} at step {i} comes after stepNumber {p} at step {pi}"
                ));
            } else if n > p + 1 {
                out.push(format!("Gap in step numbering: {p} is followed by {n}"));
            }
        }
        seen.push((n, i));
        prev = Some((n, i));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sequence.rs"]
mod tests;
