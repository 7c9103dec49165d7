//! Property-based tests for the rewrite policy.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::policy::{RewritePolicy, Rewriter};
    use proptest::prelude::*;

    /// Text built mostly from the letters of `git` / `digit` in both cases,
    /// so rule boundaries and overlaps get exercised.
    fn tricky_text() -> impl Strategy<Value = String> {
        "[dDiIgGtTuU _.-]{0,48}"
    }

    proptest! {
        /// Property: applying the policy twice equals applying it once
        #[test]
        fn policy_is_idempotent(input in tricky_text()) {
            let policy = RewritePolicy::gut();
            let once = policy.apply(&input);
            let twice = policy.apply(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: idempotence also holds for arbitrary text
        #[test]
        fn policy_is_idempotent_on_any_text(input in ".*") {
            let policy = RewritePolicy::gut();
            let once = policy.apply(&input);
            prop_assert_eq!(policy.apply(&once), once);
        }

        /// Property: no lowercase `git` survives except inside `digit`
        #[test]
        fn policy_leaves_no_stray_git(input in tricky_text()) {
            let output = RewritePolicy::gut().apply(&input);
            let stripped = output.replace("digit", "#").replace("Digit", "#");
            prop_assert!(!stripped.contains("git"), "output: {}", output);
        }

        /// Property: `digit` survives whatever surrounds it
        #[test]
        fn digit_is_restored(prefix in "[a-z _]{0,12}", suffix in "[a-z _]{0,12}") {
            for word in ["digit", "Digit", "DIGIT"] {
                let input = format!("{prefix} {word} {suffix}");
                let output = RewritePolicy::gut().apply(&input);
                prop_assert!(output.contains(word), "{} -> {}", input, output);
            }
        }

        /// Property: content rewriting is idempotent for every file name,
        /// including the patched ones
        #[test]
        fn contents_are_idempotent(
            name in prop::sample::select(vec!["read-cache.c", "utf8.c", "GUT-VERSION-GEN", "Makefile"]),
            input in "[gitGITuUdD' !=&\\[\\]1cre]{0,48}",
        ) {
            let rewriter = Rewriter::gut();
            let once = rewriter.rewrite_contents(name, &input);
            prop_assert_eq!(rewriter.rewrite_contents(name, &once), once);
        }
    }
}
