//! Properties of segment-aligned prefix matching, checked against a direct
//! restatement of the rule and end to end through a pipeline.

mod common;

use proptest::prelude::*;
use strata::{Pipeline, Prefix, Request, Response};

use common::echo_path;

/// A path built from short segments over a tiny alphabet, so that prefixes
/// and paths collide often, with an optional trailing slash. Segments may be
/// empty, which yields runs of `//`.
fn request_path() -> impl Strategy<Value = String> {
    (prop::collection::vec("[ab]{0,2}", 0..4), any::<bool>()).prop_map(|(segments, trailing)| {
        let mut path = format!("/{}", segments.join("/"));
        if trailing && !segments.is_empty() {
            path.push('/');
        }
        path
    })
}

/// A raw prefix in any of its four spellings: `a`, `a/`, `/a`, `/a/`.
fn raw_prefix() -> impl Strategy<Value = String> {
    (prop::collection::vec("[ab]{1,2}", 1..3), any::<bool>(), any::<bool>()).prop_map(
        |(segments, leading, trailing)| {
            let mut raw = segments.join("/");
            if leading {
                raw.insert(0, '/');
            }
            if trailing {
                raw.push('/');
            }
            raw
        },
    )
}

proptest! {
    #[test]
    fn prop_match_is_exact_or_segment_prefix(raw in raw_prefix(), path in request_path()) {
        let prefix = Prefix::new(&raw);
        let canonical = format!("/{}", raw.trim_matches('/'));
        let expected = path == canonical || path.starts_with(&format!("{canonical}/"));
        prop_assert_eq!(prefix.as_str(), canonical.as_str());
        prop_assert_eq!(prefix.matches(&path), expected);
    }

    #[test]
    fn prop_rewritten_path_is_well_formed(raw in raw_prefix(), path in request_path()) {
        let canonical = Prefix::new(&raw).as_str().to_owned();
        if let Some(rest) = Prefix::new(&raw).strip(&path) {
            prop_assert!(rest.starts_with('/'));
            prop_assert!(!rest.starts_with("//"));
            if path == canonical {
                prop_assert_eq!(rest, "/");
            } else {
                let tail = path[canonical.len()..].trim_start_matches('/');
                prop_assert_eq!(rest.ends_with('/'), path.ends_with('/'));
                prop_assert_eq!(rest, format!("/{tail}"));
            }
        }
    }

    #[test]
    fn prop_root_prefix_matches_everything_unchanged(path in request_path()) {
        for raw in ["", "/"] {
            prop_assert_eq!(Prefix::new(raw).strip(&path), Some(path.as_str()));
        }
    }

    #[test]
    fn prop_pipeline_hands_scoped_path_and_restores_it(raw in raw_prefix(), path in request_path()) {
        let mut pipe = Pipeline::new();
        pipe.pipe_at(&raw, echo_path());
        pipe.pipe(echo_path());

        let res = pipe.handle(Request::get(&path), Response::new()).expect("dispatch");
        let expected = Prefix::new(&raw).strip(&path).unwrap_or(path.as_str()).to_owned();
        prop_assert_eq!(res.body_text().into_owned(), expected);
    }
}
