use std::collections::BTreeMap;

/**
 * Production rules for an L-system: each key symbol is replaced by its
 * replacement sequence on every generation. Symbols without a rule are
 * copied through unchanged. Lookup is by exact (case-sensitive) symbol.
 */
pub type ProductionRules = BTreeMap<char, String>;

/**
 * Length of the sequence produced by one call to `rewrite`. Used to size
 * the output buffer exactly, so each generation is a single allocation.
 */
pub fn next_generation_len(sequence: &str, rules: &ProductionRules) -> usize {
    sequence
        .chars()
        .map(|symbol| match rules.get(&symbol) {
            Some(replacement) => replacement.len(),
            None => symbol.len_utf8(),
        })
        .sum()
}

/// Applies every production rule once, left to right.
pub fn rewrite(sequence: &str, rules: &ProductionRules) -> String {
    let mut next = String::with_capacity(next_generation_len(sequence, rules));
    for symbol in sequence.chars() {
        match rules.get(&symbol) {
            Some(replacement) => next.push_str(replacement),
            None => next.push(symbol),
        }
    }
    next
}

/**
 * Rewrites the axiom `iterations` times. Growth is usually exponential in
 * the iteration count, so anything past ~12 generations of a multi-symbol
 * alphabet gets expensive quickly.
 */
pub fn expand(axiom: &str, rules: &ProductionRules, iterations: u32) -> String {
    let mut sequence = axiom.to_owned();
    for _ in 0..iterations {
        sequence = rewrite(&sequence, rules);
    }
    sequence
}

/**
 * Iterator over successive generations of an L-system, starting with the
 * axiom itself (generation 0). It never terminates on its own; pair it
 * with `take(n + 1)` to get generations `0..=n`. Each generation is built
 * only when it is requested, so `take(n + 1)` never builds generation `n + 1`.
 */
pub struct Generations<'a> {
    rules: &'a ProductionRules,
    axiom: Option<String>,
    previous: Option<String>,
}

impl<'a> Generations<'a> {
    pub fn new(axiom: &str, rules: &'a ProductionRules) -> Generations<'a> {
        Generations {
            rules,
            axiom: Some(axiom.to_owned()),
            previous: None,
        }
    }
}

impl<'a> Iterator for Generations<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = match self.axiom.take() {
            Some(axiom) => axiom,
            None => rewrite(&self.previous.take()?, self.rules),
        };
        self.previous = Some(current.clone());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(char, &str)]) -> ProductionRules {
        pairs
            .iter()
            .map(|(symbol, replacement)| (*symbol, replacement.to_string()))
            .collect()
    }

    #[test]
    fn test_rewrite_single_generation() {
        let koch = rules(&[('F', "F+F-F-F+F")]);
        assert_eq!(rewrite("F", &koch), "F+F-F-F+F");
        assert_eq!(rewrite("F+F", &koch), "F+F-F-F+F+F+F-F-F+F");
    }

    #[test]
    fn test_rewrite_is_simultaneous() {
        // `F` produces `G`, but that `G` must not be rewritten in the same pass.
        let dragon = rules(&[('F', "F+G"), ('G', "F-G")]);
        assert_eq!(rewrite("F", &dragon), "F+G");
        assert_eq!(rewrite("F+G", &dragon), "F+G+F-G");
    }

    #[test]
    fn test_expand_zero_iterations_returns_axiom() {
        let koch = rules(&[('F', "F+F-F-F+F")]);
        assert_eq!(expand("F-G-G", &koch, 0), "F-G-G");
    }

    #[test]
    fn test_empty_axiom_stays_empty() {
        let koch = rules(&[('F', "F+F-F-F+F")]);
        for n in 0..5 {
            assert_eq!(expand("", &koch, n), "");
        }
    }

    #[test]
    fn test_identity_rule_does_not_grow() {
        let identity = rules(&[('X', "X")]);
        assert_eq!(expand("X+X", &identity, 6), "X+X");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let upper = rules(&[('F', "FF")]);
        assert_eq!(expand("fF", &upper, 2), "fFFFF");
    }

    #[test]
    fn test_next_generation_len_matches_rewrite() {
        let sierpinski = rules(&[('F', "F-G+F+G-F"), ('G', "GG")]);
        let mut sequence = String::from("F-G-G");
        for _ in 0..4 {
            let expected_len = next_generation_len(&sequence, &sierpinski);
            sequence = rewrite(&sequence, &sierpinski);
            assert_eq!(sequence.len(), expected_len);
        }
    }

    #[test]
    fn test_next_generation_len_counts_multibyte_symbols() {
        let rules = rules(&[('F', "ä")]);
        assert_eq!(next_generation_len("Fé", &rules), "äé".len());
        assert_eq!(rewrite("Fé", &rules), "äé");
    }

    #[test]
    fn test_generations_iterator() {
        let dragon = rules(&[('F', "F+G"), ('G', "F-G")]);
        let generations: Vec<String> = Generations::new("F", &dragon).take(3).collect();
        assert_eq!(generations, vec!["F", "F+G", "F+G+F-G"]);
        for (n, generation) in generations.iter().enumerate() {
            assert_eq!(generation, &expand("F", &dragon, n as u32));
        }
    }
}
