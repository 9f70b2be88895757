//! Format-level behavior tests: ordering, branch values, array index
//! handling, escaping, error reporting, and the configurable line surface.

use serde::{Deserialize, Serialize};
use serde_flatpath::{
    from_str, from_str_with_options, to_string, to_string_with_options, Error, FlatOptions,
    FlatValue, IndexMarker,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    x: i32,
    y: i32,
}

#[test]
fn roundtrip_preserves_tree_identity() {
    let input = "a.b=1\na.c=2\nlist.1=x\nlist.2=y\n";
    let tree: FlatValue = from_str(input).unwrap();
    let flattened = to_string(&tree).unwrap();
    assert_eq!(flattened, input);

    let rebuilt: FlatValue = from_str(&flattened).unwrap();
    assert_eq!(tree, rebuilt);
}

#[test]
fn object_order_is_first_seen_not_alphabetical() {
    let tree: FlatValue = from_str("a.b=1\na.c=2\na.b=1").unwrap();
    let a = tree.get("a").unwrap().as_object().unwrap();
    let keys: Vec<_> = a.keys().cloned().collect();
    assert_eq!(keys, vec!["b", "c"]);

    // reading the same document again gives the same order
    let tree2: FlatValue = from_str("a.b=1\na.c=2\na.b=1").unwrap();
    assert_eq!(tree, tree2);
}

#[test]
fn branch_value_precedes_children() {
    let tree: FlatValue = from_str("p=first\np.b=second\np.xyz=third").unwrap();
    let p = tree.get("p").unwrap();
    assert!(p.is_branch());
    assert_eq!(p.as_str(), Some("first"));

    // writing puts the self value back first, byte-identical
    let flattened = to_string(&tree).unwrap();
    assert_eq!(flattened, "p=first\np.b=second\np.xyz=third\n");
}

#[test]
fn branch_value_arriving_after_children() {
    let tree: FlatValue = from_str("p.b=second\np=first").unwrap();
    let p = tree.get("p").unwrap();
    assert!(p.is_branch());
    assert_eq!(p.as_str(), Some("first"));
    assert_eq!(p.get("b").and_then(|v| v.as_str()), Some("second"));
}

#[test]
fn arrays_reorder_by_index_regardless_of_line_order() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Doc {
        p: Vec<Record>,
    }

    let doc: Doc = from_str("p[2].y=4\np[1].x=1\np[1].y=2\np[2].x=3").unwrap();
    assert_eq!(
        doc.p,
        vec![Record { x: 1, y: 2 }, Record { x: 3, y: 4 }]
    );
}

#[test]
fn implicit_and_marker_indexes_read_the_same() {
    let implicit: Vec<String> = {
        #[derive(Deserialize)]
        struct Doc {
            p: Vec<String>,
        }
        from_str::<Doc>("p.1=a\np.2=b").unwrap().p
    };
    let marked: Vec<String> = {
        #[derive(Deserialize)]
        struct Doc {
            p: Vec<String>,
        }
        from_str::<Doc>("p[1]=a\np[2]=b").unwrap().p
    };
    assert_eq!(implicit, marked);
}

#[test]
fn writing_without_markers_is_one_based_ignoring_offset() {
    #[derive(Serialize)]
    struct Doc {
        p: Vec<Record>,
    }
    let doc = Doc {
        p: vec![Record { x: 1, y: 2 }, Record { x: 3, y: 4 }],
    };

    let options = FlatOptions::new().with_first_array_offset(3);
    let flat = to_string_with_options(&doc, options).unwrap();
    assert_eq!(flat, "p.1.x=1\np.1.y=2\np.2.x=3\np.2.y=4\n");
}

#[test]
fn writing_with_markers_applies_first_array_offset() {
    #[derive(Serialize)]
    struct Doc {
        p: Vec<Record>,
    }
    let doc = Doc {
        p: vec![Record { x: 1, y: 2 }, Record { x: 3, y: 4 }],
    };

    let options = FlatOptions::new()
        .with_first_array_offset(3)
        .with_write_index_using_markers(true);
    let flat = to_string_with_options(&doc, options).unwrap();
    assert_eq!(flat, "p[3].x=1\np[3].y=2\np[4].x=3\np[4].y=4\n");
}

#[test]
fn marker_output_reads_back_identically() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Doc {
        p: Vec<Record>,
    }
    let doc = Doc {
        p: vec![Record { x: 1, y: 2 }, Record { x: 3, y: 4 }],
    };

    let options = FlatOptions::new()
        .with_first_array_offset(3)
        .with_write_index_using_markers(true);
    let flat = to_string_with_options(&doc, options.clone()).unwrap();
    let back: Doc = from_str_with_options(&flat, options).unwrap();
    assert_eq!(doc, back);
}

#[test]
fn escaped_separator_roundtrips_byte_identical() {
    let mut map = serde_flatpath::FlatMap::new();
    map.insert("ab.c".to_string(), FlatValue::from("value"));
    let tree = FlatValue::Object(map);

    let flat = to_string(&tree).unwrap();
    assert_eq!(flat, "ab\\.c=value\n");

    let back: FlatValue = from_str(&flat).unwrap();
    assert_eq!(back.get("ab.c").and_then(|v| v.as_str()), Some("value"));
    assert_eq!(to_string(&back).unwrap(), flat);
}

#[test]
fn escaped_marker_open_is_a_literal_key() {
    let mut map = serde_flatpath::FlatMap::new();
    map.insert("price[usd]".to_string(), FlatValue::from("10"));
    let tree = FlatValue::Object(map);

    let flat = to_string(&tree).unwrap();
    assert_eq!(flat, "price\\[usd]=10\n");

    let back: FlatValue = from_str(&flat).unwrap();
    assert_eq!(back.get("price[usd]").and_then(|v| v.as_str()), Some("10"));
}

#[test]
fn duplicate_leaf_last_write_wins() {
    let tree: FlatValue = from_str("a=1\nb=2\na=3").unwrap();
    // value from the last line, position from the first
    assert_eq!(tree.get("a").and_then(|v| v.as_str()), Some("3"));
    let keys: Vec<_> = tree.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn structural_conflict_is_reported_with_path() {
    let err = from_str::<FlatValue>("a.b=1\na[1]=2").unwrap_err();
    match err {
        Error::StructuralConflict { path, line, .. } => {
            assert_eq!(path, "a[1]");
            assert_eq!(line, 2);
        }
        other => panic!("expected structural conflict, got {other}"),
    }
}

#[test]
fn malformed_marker_is_reported_with_line() {
    let err = from_str::<FlatValue>("ok=1\nbad[2=3").unwrap_err();
    match err {
        Error::MalformedIndexMarker { path, line } => {
            assert_eq!(path, "bad[2");
            assert_eq!(line, 2);
        }
        other => panic!("expected malformed marker, got {other}"),
    }
}

#[test]
fn index_gaps_compact_by_default_but_fail_strict() {
    #[derive(Deserialize, Debug)]
    struct Doc {
        p: Vec<String>,
    }

    let doc: Doc = from_str("p[1]=a\np[7]=b").unwrap();
    assert_eq!(doc.p, vec!["a", "b"]);

    let options = FlatOptions::new().with_require_contiguous_indexes(true);
    let err = from_str_with_options::<Doc>("p[1]=a\np[7]=b", options).unwrap_err();
    assert!(matches!(err, Error::ArrayIndexGap { .. }));
}

#[test]
fn key_prefix_scopes_write_and_read() {
    let record = Record { x: 1, y: 2 };
    let options = FlatOptions::new().with_key_prefix("origin");

    let flat = to_string_with_options(&record, options.clone()).unwrap();
    assert_eq!(flat, "origin.x=1\norigin.y=2\n");

    let back: Record = from_str_with_options(&flat, options.clone()).unwrap();
    assert_eq!(back, record);

    // unrelated lines are skipped on read
    let mixed = "origin.x=5\nother.x=9\norigin.y=6\n";
    let back: Record = from_str_with_options(mixed, options).unwrap();
    assert_eq!(back, Record { x: 5, y: 6 });
}

#[test]
fn custom_separator_and_marker_roundtrip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Doc {
        outer: Inner,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Inner {
        values: Vec<u8>,
    }

    let doc = Doc {
        outer: Inner {
            values: vec![7, 9],
        },
    };
    let options = FlatOptions::new()
        .with_path_separator("/")
        .with_index_marker(IndexMarker::new("<", ">"))
        .with_write_index_using_markers(true)
        .with_first_array_offset(0);

    let flat = to_string_with_options(&doc, options.clone()).unwrap();
    assert_eq!(flat, "outer/values<0>=7\nouter/values<1>=9\n");

    let back: Doc = from_str_with_options(&flat, options).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn header_indentation_and_line_ending() {
    let record = Record { x: 1, y: 2 };
    let options = FlatOptions::new()
        .with_header("# generated\n")
        .with_line_indentation("  ")
        .with_line_ending("\r\n");

    let flat = to_string_with_options(&record, options.clone()).unwrap();
    assert_eq!(flat, "# generated\n  x=1\r\n  y=2\r\n");

    // indentation and CRLF endings are tolerated on read
    let back: Record = from_str_with_options(&flat, options).unwrap();
    assert_eq!(back, record);
}

#[test]
fn key_value_separator_variants() {
    let record = Record { x: 1, y: 2 };
    let options = FlatOptions::new().with_key_value_separator(": ");

    let flat = to_string_with_options(&record, options.clone()).unwrap();
    assert_eq!(flat, "x: 1\ny: 2\n");

    let back: Record = from_str_with_options(&flat, options).unwrap();
    assert_eq!(back, record);
}

#[test]
fn empty_separator_disables_segmentation() {
    let options = FlatOptions::new().with_path_separator("");
    let tree: FlatValue = from_str_with_options("a.b.c=1", options).unwrap();
    assert_eq!(tree.get("a.b.c").and_then(|v| v.as_str()), Some("1"));
}

#[test]
fn root_scalar_roundtrips() {
    let flat = to_string(&42).unwrap();
    assert_eq!(flat, "=42\n");
    let back: i32 = from_str(&flat).unwrap();
    assert_eq!(back, 42);
}

#[test]
fn value_escapes_roundtrip() {
    let mut map = serde_flatpath::FlatMap::new();
    map.insert("text".to_string(), FlatValue::from("line1\nline2\tend\\"));
    map.insert("padded".to_string(), FlatValue::from("  keep me  "));
    let tree = FlatValue::Object(map);

    let flat = to_string(&tree).unwrap();
    let back: FlatValue = from_str(&flat).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn branch_over_array_emits_value_as_leading_element() {
    // serde's event vocabulary has no "self value then elements", so the
    // branch value of an array surfaces as its first element
    let tree: FlatValue = from_str("p=self\np[1]=a\np[2]=b").unwrap();
    let p = tree.get("p").unwrap();
    let items = p.as_array().unwrap();
    let texts: Vec<_> = items.iter().filter_map(FlatValue::as_str).collect();
    assert_eq!(texts, vec!["self", "a", "b"]);
}

#[test]
fn simple_indexes_disabled_keeps_numeric_keys() {
    let options = FlatOptions::new().with_parse_simple_indexes(false);
    let tree: FlatValue = from_str_with_options("ids.1=a\nids.2=b", options).unwrap();
    let ids = tree.get("ids").unwrap();
    assert!(ids.is_object());
    assert_eq!(ids.get("1").and_then(|v| v.as_str()), Some("a"));
}
