//! Library-level pipeline tests
//!
//! Runs the full prune pipeline (parse, call graph, closure, selection,
//! emission) over in-memory sources and checks the emitted token streams.

use std::path::Path;

use ctrim::{
    CParser, CallGraphBuilder, ClosureEngine, Emitter, Selector, SymbolSet, UndefinedCall,
};

/// Run the whole pipeline over a source snippet, returning the emitted text
/// and the completeness warnings
fn prune(source: &str, keep: &[&str], blacklist: &[&str]) -> (String, Vec<UndefinedCall>) {
    let unit = CParser::new()
        .parse_source(Path::new("mem.c"), source.to_string())
        .expect("test source should parse");
    let graph = CallGraphBuilder::new()
        .build(&unit)
        .expect("call graph should build");

    let mut keep_set: SymbolSet = keep.iter().copied().collect();
    let blacklist_set: SymbolSet = blacklist.iter().copied().collect();
    let warnings = ClosureEngine::new()
        .expand(&mut keep_set, &graph)
        .expect("closure should succeed");

    let selector = Selector::new(&keep_set, &blacklist_set);
    let mut emitter = Emitter::new(Vec::new());
    for decl in unit.top_level_declarations() {
        if selector.verdict(&decl).should_emit() {
            emitter.emit(&unit, &decl).expect("emission should succeed");
        }
    }

    (
        String::from_utf8(emitter.into_inner()).unwrap(),
        warnings,
    )
}

#[test]
fn test_kept_function_pulls_in_transitive_callees() {
    let (out, warnings) = prune(
        "int h() { return 1; }\nint g() { return h(); }\nint f() { return g(); }\n",
        &["f"],
        &[],
    );

    assert!(warnings.is_empty());
    // All three definitions survive, in source order
    let h_at = out.find("int\nh\n").unwrap();
    let g_at = out.find("int\ng\n").unwrap();
    let f_at = out.find("int\nf\n").unwrap();
    assert!(h_at < g_at && g_at < f_at);
}

#[test]
fn test_blacklisted_function_is_skipped_but_its_callees_survive() {
    // The blacklist is consulted only at emission: g stays reachable, so h
    // is still kept even though g itself never prints
    let (out, warnings) = prune(
        "int h() { return 1; }\nint g() { return h(); }\nint f() { return g(); }\n",
        &["f"],
        &["g"],
    );

    assert!(warnings.is_empty());
    assert!(out.contains("int\nh\n"));
    assert!(out.contains("int\nf\n"));
    assert!(!out.contains("int\ng\n(\n)\n{\n"));
}

#[test]
fn test_undefined_callee_is_reported_not_kept() {
    let (out, warnings) = prune("int f() { return h(); }\n", &["f"], &[]);

    assert_eq!(
        warnings,
        [UndefinedCall {
            caller: "f".to_string(),
            callee: "h".to_string(),
        }]
    );
    assert_eq!(out, "int\nf\n(\n)\n{\nreturn\nh\n(\n)\n;\n}\n");
}

#[test]
fn test_last_function_in_file_keeps_its_closing_brace() {
    let (out, _) = prune("int f() { return 0; }", &["f"], &[]);
    assert_eq!(out, "int\nf\n(\n)\n{\nreturn\n0\n;\n}\n");
}

#[test]
fn test_typedef_struct_prints_once() {
    let (out, _) = prune("typedef struct { int x; } foo_t;\n", &[], &[]);
    assert_eq!(out, "typedef\nstruct\n{\nint\nx\n;\n}\nfoo_t\n;\n");
}

#[test]
fn test_named_typedef_struct_prints_once() {
    let (out, _) = prune("typedef struct foo { int x; } foo_t;\n", &[], &[]);
    assert_eq!(
        out,
        "typedef\nstruct\nfoo\n{\nint\nx\n;\n}\nfoo_t\n;\n"
    );
}

#[test]
fn test_non_functions_survive_an_empty_keep_set() {
    let (out, _) = prune(
        "struct point { int x; };\nint counter;\nint f() { return 0; }\n",
        &[],
        &[],
    );

    assert!(out.contains("struct\npoint\n"));
    assert!(out.contains("int\ncounter\n;\n"));
    assert!(!out.contains("return"));
}

#[test]
fn test_prototype_of_kept_function_survives() {
    let (out, _) = prune("int f(void);\nint f(void) { return 0; }\n", &["f"], &[]);

    // Both the prototype and the definition are f declarations
    assert_eq!(
        out,
        "int\nf\n(\nvoid\n)\n;\nint\nf\n(\nvoid\n)\n{\nreturn\n0\n;\n}\n"
    );
}

#[test]
fn test_comments_inside_a_kept_function_are_tokens() {
    let (out, _) = prune("int f() { /* forty-one plus one */ return 42; }\n", &["f"], &[]);
    assert!(out.contains("/* forty-one plus one */\n"));
}

#[test]
fn test_string_literal_stays_on_one_line() {
    let (out, _) = prune(
        "const char *msg = \"a, b; c\";\n",
        &[],
        &[],
    );
    assert!(out.contains("\"a, b; c\"\n"));
}

#[test]
fn test_recursive_function_terminates_and_survives() {
    let (out, warnings) = prune("int f(int n) { return n ? f(n - 1) : 0; }\n", &["f"], &[]);

    assert!(warnings.is_empty());
    assert!(out.starts_with("int\nf\n("));
}

#[test]
fn test_mutual_recursion_is_closed() {
    let (out, _) = prune(
        "int odd(int n);\nint even(int n) { return n == 0 ? 1 : odd(n - 1); }\nint odd(int n) { return n == 0 ? 0 : even(n - 1); }\n",
        &["even"],
        &[],
    );

    assert!(out.contains("int\neven\n"));
    // odd's prototype and definition both survive via the closure
    assert_eq!(out.matches("int\nodd\n(").count(), 2);
}

#[test]
fn test_keep_name_with_no_definition_is_harmless() {
    let (out, warnings) = prune("int f() { return 0; }\n", &["ghost"], &[]);

    assert!(warnings.is_empty());
    assert_eq!(out, "");
}
