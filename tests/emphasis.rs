use shakesearch::emphasis::*;

#[cfg(test)]
mod parse_emphasis_tests {
    use super::*;

    mod plain_text {
        use super::*;

        #[test]
        fn test_empty_string() {
            assert_eq!(parse_emphasis(""), "");
        }

        #[test]
        fn test_text_without_underscores_is_unchanged() {
            let text = "Now is the winter of our discontent";
            assert_eq!(parse_emphasis(text), text);
        }

        #[test]
        fn test_other_markdown_is_left_alone() {
            let text = "**bold** [link](x) # header *star*";
            assert_eq!(parse_emphasis(text), text);
        }

        #[test]
        fn test_multiline_text_without_underscores() {
            let text = "HAMLET\nTo be, or not to be\n";
            assert_eq!(parse_emphasis(text), text);
        }
    }

    mod balanced_spans {
        use super::*;

        #[test]
        fn test_span_in_the_middle() {
            assert_eq!(parse_emphasis("a_b_c"), "a<em>b</em>c");
        }

        #[test]
        fn test_whole_text_emphasized() {
            let out = parse_emphasis("_hi_");
            assert_eq!(out, "<em>hi</em>");
            assert_eq!(out.matches("<em>").count(), 1);
            assert_eq!(out.matches("</em>").count(), 1);
        }

        #[test]
        fn test_two_independent_spans() {
            assert_eq!(
                parse_emphasis("_Exit_, pursued by a _bear_"),
                "<em>Exit</em>, pursued by a <em>bear</em>"
            );
        }

        #[test]
        fn test_adjacent_underscores_give_empty_span() {
            assert_eq!(parse_emphasis("a__b"), "a<em></em>b");
        }

        #[test]
        fn test_spans_across_lines() {
            assert_eq!(parse_emphasis("_Enter\nGhost_"), "<em>Enter\nGhost</em>");
        }
    }

    mod unterminated_spans {
        use super::*;

        #[test]
        fn test_trailing_span_is_closed() {
            assert_eq!(parse_emphasis("a_b_c_d"), "a<em>b</em>c<em>d</em>");
        }

        #[test]
        fn test_three_underscores_from_start() {
            assert_eq!(parse_emphasis("_a_b_c"), "<em>a</em>b<em>c</em>");
        }

        #[test]
        fn test_single_underscore_at_end() {
            assert_eq!(parse_emphasis("tail_"), "tail<em></em>");
        }

        #[test]
        fn test_single_underscore_at_start() {
            assert_eq!(parse_emphasis("_rest"), "<em>rest</em>");
        }

        #[test]
        fn test_output_always_ends_outside_emphasis() {
            for text in ["_", "a_", "_a_b", "x_y_z_w_v", "___"] {
                let out = parse_emphasis(text);
                assert_eq!(
                    out.matches("<em>").count(),
                    out.matches("</em>").count(),
                    "unbalanced output for {text:?}: {out}"
                );
                assert_eq!(out.matches("<em>").count(), span_count(text));
            }
        }
    }

    mod markers {
        use super::*;

        #[test]
        fn test_default_markers_are_html() {
            assert_eq!(EmphasisMarkers::default(), HTML_MARKERS);
        }

        #[test]
        fn test_ansi_markers() {
            assert_eq!(
                parse_emphasis_with("_thou_", ANSI_MARKERS),
                "\x1b[3mthou\x1b[23m"
            );
        }

        #[test]
        fn test_markers_are_not_escaped_or_reparsed() {
            let markers = EmphasisMarkers {
                open: "_",
                close: "_",
            };
            assert_eq!(parse_emphasis_with("a_b", markers), "a_b_");
        }
    }
}
