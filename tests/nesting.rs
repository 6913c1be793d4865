mod common;

use std::sync::Arc;

use strata::middleware::{middleware, path};
use strata::{Middleware, Next, Pipeline, Request, Response};

use common::{echo_path, found, init_tracing};

const ROOT_PREFIXES: [&str; 2] = ["", "/"];
const TOP_PREFIXES: [&str; 4] = ["foo", "foo/", "/foo", "/foo/"];
const NESTED_PREFIXES: [&str; 4] = ["bar", "bar/", "/bar", "/bar/"];

/// Every (top prefix, nested prefix, request path, expected match) combination:
/// bare, trailing-slash, deeper, and same-segment-longer request paths.
fn boundary_cases() -> Vec<(&'static str, &'static str, &'static str, bool)> {
    let mut cases = Vec::new();
    for top in ROOT_PREFIXES {
        for nested in TOP_PREFIXES {
            for (full, expected) in [
                ("/foo", true),
                ("/foobar", false),
                ("/foo/", true),
                ("/foo/bar", true),
            ] {
                cases.push((top, nested, full, expected));
            }
        }
    }
    for top in TOP_PREFIXES {
        for nested in NESTED_PREFIXES {
            for (full, expected) in [
                ("/foo/bar", true),
                ("/foo/barbaz", false),
                ("/foo/bar/", true),
                ("/foo/bar/baz", true),
            ] {
                cases.push((top, nested, full, expected));
            }
        }
    }
    cases
}

#[test]
fn test_nested_pipeline_matches_only_at_path_boundaries() {
    init_tracing();
    for (top, nested, full, expected) in boundary_cases() {
        let mut nest = Pipeline::new();
        nest.pipe_at(nested, found());
        let mut pipe = Pipeline::new();
        pipe.pipe_at(top, nest);

        let res = pipe.handle(Request::get(full), Response::new()).expect("dispatch");
        assert_eq!(
            res.has_header("x-found"),
            expected,
            "full path {full} against top pipe {top:?} and nested pipe {nested:?}",
        );
    }
}

#[test]
fn test_nested_pipeline_invoked_from_callable_matches_only_at_path_boundaries() {
    for (top, nested, full, expected) in boundary_cases() {
        let mut nest = Pipeline::new();
        nest.pipe_at(nested, found());
        let nest = Arc::new(nest);

        let mut pipe = Pipeline::new();
        pipe.pipe_at(top, middleware(move |req: Request, next: Next<'_>| nest.process(req, next)));

        let res = pipe.handle(Request::get(full), Response::new()).expect("dispatch");
        assert_eq!(
            res.has_header("x-found"),
            expected,
            "full path {full} against top pipe {top:?} and nested pipe {nested:?}",
        );
    }
}

#[test]
fn test_path_decorator_matches_only_at_path_boundaries() {
    for (top, nested, full, expected) in boundary_cases() {
        let mut pipe = Pipeline::new();
        pipe.pipe(path(top, path(nested, found())));

        let res = pipe.handle(Request::get(full), Response::new()).expect("dispatch");
        assert_eq!(
            res.has_header("x-found"),
            expected,
            "full path {full} against outer scope {top:?} and inner scope {nested:?}",
        );
    }
}

#[test]
fn test_deeply_nested_rewrites_are_undone_on_the_way_out() {
    // Each level sees its own slice of the path; the fallback sees all of it.
    let mut v1 = Pipeline::new();
    v1.pipe_at("/users", middleware(|req: Request, next: Next<'_>| {
        assert_eq!(req.path(), "/42/");
        assert_eq!(next.path(), "/users/42/");
        next.run(req)
    }));
    let mut api = Pipeline::new();
    api.pipe_at("/v1", v1);
    api.pipe(middleware(|req: Request, next: Next<'_>| {
        assert_eq!(req.path(), "/v1/users/42/");
        next.run(req)
    }));
    let mut app = Pipeline::new();
    app.pipe_at("/api", api);
    app.pipe(echo_path());

    let res = app.handle(Request::get("/api/v1/users/42/"), Response::new()).expect("dispatch");
    assert_eq!(res.body_text(), "/api/v1/users/42/");
}

#[test]
fn test_path_decorator_restores_path_for_next() {
    let mut pipe = Pipeline::new();
    pipe.pipe(path("/admin", middleware(|req: Request, next: Next<'_>| {
        assert_eq!(req.path(), "/settings");
        next.run(req)
    })));
    pipe.pipe(echo_path());

    let res = pipe.handle(Request::get("/admin/settings"), Response::new()).expect("dispatch");
    assert_eq!(res.body_text(), "/admin/settings");

    let res = pipe.handle(Request::get("/administrator"), Response::new()).expect("dispatch");
    assert_eq!(res.body_text(), "/administrator");
}
