// Host-side tests for the Act 3 bundle manifest and asset path rewriting.

#![allow(dead_code)]
mod warp {
    pub mod bundle {
        include!("../src/core/bundle.rs");
    }
}

use warp::bundle::{resolve_asset_path, rewrite_asset_urls, BundleError, BundleManifest};

const VITE_INDEX: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="icon" type="image/svg+xml" href="/vite.svg" />
    <title>Solar</title>
    <script type="module" crossorigin src="/assets/index-4f2a9c.js"></script>
    <link rel="modulepreload" crossorigin href="/assets/vendor-11aa.js">
    <link rel="stylesheet" crossorigin href="/assets/index-77b0.css">
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>"#;

#[test]
fn parses_a_vite_index() {
    let m = BundleManifest::parse(VITE_INDEX);
    assert_eq!(m.stylesheets.to_vec(), vec!["/assets/index-77b0.css".to_string()]);
    assert_eq!(m.module_script.as_deref(), Some("/assets/index-4f2a9c.js"));
    assert_eq!(m.require_script(), Ok("/assets/index-4f2a9c.js"));
}

#[test]
fn modulepreload_and_icons_are_not_stylesheets() {
    let m = BundleManifest::parse(
        r#"<link rel="modulepreload" href="/a.js"><link rel="icon" href="/i.png">"#,
    );
    assert!(m.stylesheets.is_empty());
}

#[test]
fn commented_out_tags_are_skipped() {
    let m = BundleManifest::parse(
        r#"<!-- <script type="module" src="/old.js"></script> -->
           <script type="module" src="/new.js"></script>"#,
    );
    assert_eq!(m.module_script.as_deref(), Some("/new.js"));
}

#[test]
fn first_module_script_wins_and_classic_scripts_are_ignored() {
    let m = BundleManifest::parse(
        r#"<script src="/legacy.js"></script>
           <script type="module" src="/one.js"></script>
           <script type="module" src="/two.js"></script>"#,
    );
    assert_eq!(m.module_script.as_deref(), Some("/one.js"));
}

#[test]
fn missing_module_script_is_an_error() {
    let m = BundleManifest::parse(r#"<link rel="stylesheet" href="/a.css">"#);
    assert_eq!(m.stylesheets.len(), 1);
    assert_eq!(m.require_script(), Err(BundleError::MissingModuleScript));
    assert_eq!(
        BundleError::MissingModuleScript.to_string(),
        "bundle index has no module script"
    );
}

#[test]
fn attribute_quoting_and_case_variants() {
    let m = BundleManifest::parse(
        "<LINK REL='Stylesheet' HREF='/x.css'><link rel=stylesheet href=/y.css>\
         <script TYPE=\"MODULE\" src='/m.js' defer></script>",
    );
    assert_eq!(
        m.stylesheets.to_vec(),
        vec!["/x.css".to_string(), "/y.css".to_string()]
    );
    assert_eq!(m.module_script.as_deref(), Some("/m.js"));
}

#[test]
fn quoted_gt_does_not_end_the_tag() {
    let m = BundleManifest::parse(r#"<script type="module" data-x="a>b" src="/q.js"></script>"#);
    assert_eq!(m.module_script.as_deref(), Some("/q.js"));
}

#[test]
fn empty_and_garbage_input() {
    assert_eq!(BundleManifest::parse(""), BundleManifest::default());
    let m = BundleManifest::parse("<<< not html <script type=module");
    assert!(m.module_script.is_none());
}

#[test]
fn asset_paths_resolve_under_the_prefix() {
    assert_eq!(resolve_asset_path("/assets/a.js", "/solar-dist"), "/solar-dist/assets/a.js");
    assert_eq!(resolve_asset_path("./assets/a.js", "/solar-dist"), "/solar-dist/assets/a.js");
    assert_eq!(resolve_asset_path("assets/a.js", "/solar-dist/"), "/solar-dist/assets/a.js");
}

#[test]
fn asset_urls_are_rewritten_everywhere() {
    let css = "body{background:url(/assets/bg.png)} .x{src:url('/assets/f.woff2')}";
    assert_eq!(
        rewrite_asset_urls(css, "/solar-dist"),
        "body{background:url(/solar-dist/assets/bg.png)} .x{src:url('/solar-dist/assets/f.woff2')}"
    );
    let js = r#"import("/assets/chunk.js");const u="/assets/tex.jpg";"#;
    let out = rewrite_asset_urls(js, "/solar-dist");
    assert!(out.contains(r#""/solar-dist/assets/chunk.js""#));
    assert!(out.contains(r#""/solar-dist/assets/tex.jpg""#));
    assert_eq!(rewrite_asset_urls("no refs here", "/p"), "no refs here");
}

#[test]
fn status_error_names_the_path() {
    let e = BundleError::Status {
        path: "/solar-dist/index.html".into(),
        status: 404,
    };
    assert_eq!(e.to_string(), "fetch /solar-dist/index.html returned status 404");
}
