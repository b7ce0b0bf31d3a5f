//! Behavioral tests for the four path variants.
//!
//! Every test replays the same operation sequence against all variants
//! through the `Path` trait, so growable, persistent, detached, and
//! reference paths are held to identical semantics.

use wayline::{
    DetachedPath, ImmutablePath, MutablePath, Path, Pop, PopSelection, ReferencePath,
    TraversalError, Value,
};

type PathFactory = fn() -> Box<dyn Path>;

fn factories() -> [PathFactory; 4] {
    [
        || Box::new(MutablePath::new()),
        || Box::new(ImmutablePath::new()),
        || Box::new(DetachedPath::new()),
        || Box::new(ReferencePath::new()),
    ]
}

fn labels(ls: &[&str]) -> Vec<String> {
    ls.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn standard_semantics() {
    for make in factories() {
        let mut path = make();
        assert!(path.is_simple());
        assert_eq!(path.size(), 0);

        path = path.extend(Value::Int(1), labels(&["a"]));
        path = path.extend(Value::Int(2), labels(&["b"]));
        path = path.extend(Value::Int(3), labels(&["c"]));
        assert_eq!(path.size(), 3);
        assert_eq!(path.get("a").unwrap(), Value::Int(1));
        assert_eq!(path.get("b").unwrap(), Value::Int(2));
        assert_eq!(path.get("c").unwrap(), Value::Int(3));

        // Labels-only extension decorates the last entry.
        path = path.extend_labels(labels(&["d"]));
        assert_eq!(path.size(), 3);
        assert_eq!(path.get("d").unwrap(), Value::Int(3));
        assert!(path.has_label("a"));
        assert!(path.has_label("b"));
        assert!(path.has_label("c"));
        assert!(path.has_label("d"));
        assert!(!path.has_label("e"));
        assert!(path.is_simple());

        path = path.extend(Value::Int(3), labels(&["e"]));
        assert!(!path.is_simple());
        assert!(path.has_label("e"));
        assert_eq!(path.size(), 4);
        assert_eq!(path.object(0), Some(Value::Int(1)));
        assert_eq!(path.object(1), Some(Value::Int(2)));
        assert_eq!(path.object(2), Some(Value::Int(3)));
        assert_eq!(path.object(3), Some(Value::Int(3)));

        // Retracting an absent label changes nothing.
        path = path.retract(&labels(&["f"]));
        let retracted = path.clone_path();
        assert!(!path.has_label("f"));
        assert_eq!(path.size(), 4);
        assert_eq!(retracted, path);

        path = path.retract(&labels(&["b"]));
        assert!(!path.has_label("b"));
        assert_eq!(path.size(), 3);
        assert_eq!(retracted.clone_path().retract(&labels(&["b"])), path);

        path = path.retract(&labels(&["a"]));
        assert_eq!(path.size(), 2);
        assert!(!path.has_label("a"));
        assert!(path.has_label("d"));

        path = path.retract(&labels(&["c", "d"]));
        assert!(!path.has_label("c"));
        assert!(!path.has_label("d"));
        assert!(path.has_label("e"));
        assert_eq!(path.size(), 1);

        path = path.retract(&labels(&["e"]));
        assert!(!path.has_label("e"));
        assert_ne!(retracted, path);
        assert_eq!(path.size(), 0);
    }
}

#[test]
fn multi_label_lookup_returns_ordered_list() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a"]));
        path = path.extend(Value::from("stephen"), labels(&["b"]));
        path = path.extend(Value::from("matthias"), labels(&["a"]));
        assert_eq!(path.size(), 3);
        assert_eq!(path.objects().len(), 3);
        assert_eq!(path.labels().len(), 3);

        assert_eq!(
            path.get("a").unwrap(),
            Value::Array(vec![Value::from("marko"), Value::from("matthias")])
        );
        assert_eq!(path.get("b").unwrap(), Value::from("stephen"));
        assert!(matches!(
            path.get("missing"),
            Err(TraversalError::LabelNotFound(l)) if l == "missing"
        ));
    }
}

#[test]
fn per_entry_label_sets_preserve_insertion_order() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a", "b"]));
        path = path.extend(Value::from("stephen"), labels(&["c", "a"]));
        path = path.extend(Value::from("matthias"), labels(&["a", "b"]));

        let label_sets = path.labels();
        assert_eq!(label_sets[0], labels(&["a", "b"]));
        assert_eq!(label_sets[1], labels(&["c", "a"]));
        assert_eq!(label_sets[2], labels(&["a", "b"]));

        assert_eq!(
            path.all("a"),
            vec![Value::from("marko"), Value::from("stephen"), Value::from("matthias")]
        );
        assert_eq!(path.all("b"), vec![Value::from("marko"), Value::from("matthias")]);
        assert_eq!(path.get("c").unwrap(), Value::from("stephen"));
    }
}

#[test]
fn unlabeled_entries_keep_empty_label_sets() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a"]));
        path = path.extend(Value::from("stephen"), labels(&["b"]));
        path = path.extend(Value::from("matthias"), labels(&["c", "d"]));

        let label_sets = path.labels();
        assert_eq!(label_sets.len(), 3);
        assert_eq!(label_sets[0].len(), 1);
        assert_eq!(label_sets[1], labels(&["b"]));
        assert_eq!(label_sets[2], labels(&["c", "d"]));
    }
}

#[test]
fn pop_first_and_last_select_boundary_values() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a", "b"]));
        path = path.extend(Value::from("stephen"), labels(&["a", "c"]));
        path = path.extend(Value::Null, labels(&["x", "x"]));
        path = path.extend(Value::from("matthias"), labels(&["c", "d"]));
        assert_eq!(path.size(), 4);

        assert_eq!(path.first("a"), Some(Value::from("marko")));
        assert_eq!(path.first("b"), Some(Value::from("marko")));
        assert_eq!(path.first("c"), Some(Value::from("stephen")));
        assert_eq!(path.first("x"), Some(Value::Null));
        assert_eq!(path.first("d"), Some(Value::from("matthias")));

        assert_eq!(path.last("b"), Some(Value::from("marko")));
        assert_eq!(path.last("a"), Some(Value::from("stephen")));
        assert_eq!(path.last("x"), Some(Value::Null));
        assert_eq!(path.last("c"), Some(Value::from("matthias")));
        assert_eq!(path.last("d"), Some(Value::from("matthias")));

        // Absence is a valid outcome for pop-qualified lookups.
        assert_eq!(path.first("missing"), None);
        assert_eq!(path.get_pop(Pop::Last, "missing"), PopSelection::Single(None));
    }
}

#[test]
fn pop_all_selects_every_value_in_path_order() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a", "b"]));
        path = path.extend(Value::from("stephen"), labels(&["a", "c"]));
        path = path.extend(Value::from("matthias"), labels(&["c", "d"]));
        assert_eq!(path.size(), 3);

        assert_eq!(path.all("a"), vec![Value::from("marko"), Value::from("stephen")]);
        assert_eq!(path.all("b"), vec![Value::from("marko")]);
        assert_eq!(path.all("c"), vec![Value::from("stephen"), Value::from("matthias")]);
        assert_eq!(path.all("d"), vec![Value::from("matthias")]);
        assert_eq!(path.all("noExist"), Vec::<Value>::new());
    }
}

#[test]
fn equality_requires_identical_values_and_label_sets() {
    for make in factories() {
        let mut a1 = make();
        let mut a2 = make();
        let mut b1 = make();
        let mut b2 = make();
        assert_eq!(a1, a2);
        assert_eq!(a2, b1);
        assert_eq!(b1, b2);

        a1 = a1.extend(Value::from("marko"), labels(&["a"]));
        a2 = a2.extend(Value::from("marko"), labels(&["a"]));
        b1 = b1.extend(Value::from("marko"), labels(&["b"]));
        b2 = b2.extend(Value::from("marko"), labels(&["b"]));
        assert_eq!(a1, a2);
        assert_eq!(a1.hash_path(), a2.hash_path());
        assert_ne!(a2, b1);
        assert_eq!(b1, b2);
        assert_eq!(b1.hash_path(), b2.hash_path());

        a1 = a1.extend(Value::from("daniel"), labels(&["aa", "aaa"]));
        a2 = a2.extend(Value::from("daniel"), labels(&["aa", "aaa"]));
        b1 = b1.extend(Value::from("stephen"), labels(&["bb", "bbb"]));
        b2 = b2.extend(Value::from("stephen"), labels(&["bb"]));
        assert_eq!(a1, a2);
        assert_ne!(a2, b1);
        assert_ne!(b1, b2);

        a1 = a1.extend(Value::Null, labels(&["aa", "aaa"]));
        a2 = a2.extend(Value::Null, labels(&["aa", "aaa"]));
        b1 = b1.extend(Value::Null, labels(&["bb", "bbb"]));
        b2 = b2.extend(Value::Null, labels(&["bb"]));
        assert_eq!(a1, a2);
        assert_ne!(a2, b1);
        assert_ne!(b1, b2);

        a1 = a1.extend(Value::from("matthias"), labels(&["aaaa", "aaaaa"]));
        a2 = a2.extend(Value::from("bob"), labels(&["aaaa", "aaaaa"]));
        b1 = b1.extend(Value::from("byn"), labels(&["bbbb"]));
        b2 = b2.extend(Value::from("bryn"), labels(&["bbbb"]));
        assert_ne!(a1, a2);
        assert_ne!(a2, b1);
        assert_ne!(b1, b2);
    }
}

#[test]
fn label_set_order_does_not_affect_equality() {
    for make in factories() {
        let a = make().extend(Value::Int(1), labels(&["a", "b"]));
        let b = make().extend(Value::Int(1), labels(&["b", "a"]));
        assert_eq!(a, b);
        assert_eq!(a.hash_path(), b.hash_path());
    }
}

#[test]
fn pop_equality() {
    for make in factories() {
        let mut a1 = make();
        let mut a2 = make();
        let mut b1 = make();
        let mut b2 = make();
        for pop in [Pop::All, Pop::First, Pop::Last] {
            assert!(a1.pop_equals(pop, a2.as_ref()));
            assert!(a2.pop_equals(pop, b1.as_ref()));
            assert!(b1.pop_equals(pop, b2.as_ref()));
        }

        a1 = a1.extend(Value::from("marko"), labels(&["a"]));
        a2 = a2.extend(Value::from("marko"), labels(&["a"]));
        b1 = b1.extend(Value::from("matthias"), labels(&["a"]));
        b2 = b2.extend(Value::from("matthias"), labels(&["a"]));
        for pop in [Pop::All, Pop::First, Pop::Last] {
            assert!(a1.pop_equals(pop, a2.as_ref()));
            assert!(!a2.pop_equals(pop, b1.as_ref()));
            assert!(b1.pop_equals(pop, b2.as_ref()));
        }

        a1 = a1.extend(Value::from("matthias"), labels(&["a"]));
        a2 = a2.extend(Value::from("matthias"), labels(&["a"]));
        b1 = b1.extend(Value::from("marko"), labels(&["a"]));
        b2 = b2.extend(Value::from("marko"), labels(&["a"]));
        for pop in [Pop::All, Pop::First, Pop::Last] {
            assert!(a1.pop_equals(pop, a2.as_ref()));
            assert!(!a2.pop_equals(pop, b1.as_ref()));
            assert!(b1.pop_equals(pop, b2.as_ref()));
        }

        // From here the two lineages converge on their most recent "a".
        a1 = a1.extend(Value::from("bob"), labels(&["a"]));
        a2 = a2.extend(Value::from("bob"), labels(&["a"]));
        b1 = b1.extend(Value::from("bob"), labels(&["a"]));
        b2 = b2.extend(Value::from("bob"), labels(&["a"]));
        for pop in [Pop::All, Pop::First] {
            assert!(a1.pop_equals(pop, a2.as_ref()));
            assert!(!a2.pop_equals(pop, b1.as_ref()));
            assert!(b1.pop_equals(pop, b2.as_ref()));
        }
        assert!(a1.pop_equals(Pop::Last, a2.as_ref()));
        assert!(a2.pop_equals(Pop::Last, b1.as_ref()));
        assert!(b1.pop_equals(Pop::Last, b2.as_ref()));

        a1 = a1.extend(Value::from("stephen"), labels(&["b"]));
        a2 = a2.extend(Value::from("stephen"), labels(&["b"]));
        b1 = b1.extend(Value::from("stephen"), labels(&["b"]));
        b2 = b2.extend(Value::from("stephen"), labels(&["b"]));
        assert!(!a2.pop_equals(Pop::All, b1.as_ref()));
        assert!(!a2.pop_equals(Pop::First, b1.as_ref()));
        assert!(a2.pop_equals(Pop::Last, b1.as_ref()));

        a1 = a1.extend(Value::Null, labels(&["x"]));
        a2 = a2.extend(Value::Null, labels(&["x"]));
        b1 = b1.extend(Value::Null, labels(&["x"]));
        b2 = b2.extend(Value::Null, labels(&["x"]));
        assert!(a1.pop_equals(Pop::All, a2.as_ref()));
        assert!(!a2.pop_equals(Pop::All, b1.as_ref()));
        assert!(a2.pop_equals(Pop::Last, b1.as_ref()));

        // Diverging tail labels break every mode, but self-comparison holds.
        a1 = a1.extend(Value::from("stephen"), labels(&["c"]));
        a2 = a2.extend(Value::from("stephen"), labels(&["d"]));
        b1 = b1.extend(Value::from("marko"), labels(&["e"]));
        b2 = b2.extend(Value::from("stephen"), labels(&["f"]));
        for pop in [Pop::All, Pop::First, Pop::Last] {
            assert!(a1.pop_equals(pop, a1.as_ref()));
            assert!(!a1.pop_equals(pop, a2.as_ref()));
            assert!(!a2.pop_equals(pop, b1.as_ref()));
            assert!(!b1.pop_equals(pop, b2.as_ref()));
        }
    }
}

#[test]
fn cross_variant_equality() {
    let paths: Vec<Box<dyn Path>> = factories()
        .into_iter()
        .map(|make| {
            make()
                .extend(Value::from("marko"), labels(&["a", "aa"]))
                .extend(Value::from("daniel"), labels(&["b"]))
        })
        .collect();

    for a in &paths {
        for b in &paths {
            assert_eq!(a, b);
            assert_eq!(a.hash_path(), b.hash_path());
        }
    }
}

#[test]
fn sub_path_isolates_labeled_slices() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a"]));
        path = path.extend(Value::from("stephen"), labels(&["b"]));
        path = path.extend(Value::from("matthias"), labels(&["c", "x"]));
        path = path.extend(Value::from("bob"), labels(&["d"]));
        assert_eq!(path.size(), 4);

        let sub = path.sub_path(Some("b"), Some("c")).unwrap();
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.objects(), vec![Value::from("stephen"), Value::from("matthias")]);
        assert_eq!(sub.labels()[0], labels(&["b"]));
        assert_eq!(sub.labels()[1], labels(&["c", "x"]));

        let sub = path.sub_path(Some("b"), Some("b")).unwrap();
        assert_eq!(sub.size(), 1);
        assert_eq!(sub.objects(), vec![Value::from("stephen")]);

        let sub = path.sub_path(Some("c"), Some("d")).unwrap();
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.objects(), vec![Value::from("matthias"), Value::from("bob")]);
        assert_eq!(sub.labels()[0], labels(&["c", "x"]));
        assert_eq!(sub.labels()[1], labels(&["d"]));

        // Absent endpoints default to the path boundaries.
        let sub = path.sub_path(Some("c"), None).unwrap();
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.objects(), vec![Value::from("matthias"), Value::from("bob")]);

        let sub = path.sub_path(Some("a"), Some("d")).unwrap();
        assert_eq!(sub.size(), 4);

        let sub = path.sub_path(None, Some("d")).unwrap();
        assert_eq!(sub.size(), 4);

        assert!(matches!(
            path.sub_path(Some("d"), Some("a")),
            Err(TraversalError::SubPathOutOfOrder { from, to }) if from == "d" && to == "a"
        ));
        assert!(matches!(
            path.sub_path(Some("a"), Some("e")),
            Err(TraversalError::SubPathToLabelNotFound(l)) if l == "e"
        ));
        assert!(matches!(
            path.sub_path(Some("e"), Some("b")),
            Err(TraversalError::SubPathFromLabelNotFound(l)) if l == "e"
        ));
    }
}

#[test]
fn sub_path_endpoints_resolve_to_last_occurrences() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::from("marko"), labels(&["a"]));
        path = path.extend(Value::from("stephen"), labels(&["a"]));
        path = path.extend(Value::from("matthias"), labels(&["c", "x"]));
        path = path.extend(Value::from("bob"), labels(&["c"]));
        assert_eq!(path.size(), 4);

        let sub = path.sub_path(Some("a"), Some("c")).unwrap();
        assert_eq!(sub.size(), 3);
        assert_eq!(
            sub.objects(),
            vec![Value::from("stephen"), Value::from("matthias"), Value::from("bob")]
        );
        assert_eq!(sub.labels()[0], labels(&["a"]));
        assert_eq!(sub.labels()[1], labels(&["c", "x"]));
        assert_eq!(sub.labels()[2], labels(&["c"]));
    }
}

#[test]
fn null_values_participate_in_simplicity() {
    for make in factories() {
        let mut path = make();
        assert!(path.is_simple());
        path = path.extend(Value::Null, vec![]);
        assert!(path.is_simple());
        path = path.extend(Value::Int(1), vec![]);
        assert!(path.is_simple());
        path = path.extend(Value::Null, vec![]);
        assert!(!path.is_simple());
    }
}

#[test]
fn retract_drops_exactly_emptied_entries() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::Int(1), labels(&["a"]));
        path = path.extend(Value::Int(2), labels(&["b"]));
        path = path.extend(Value::Int(3), labels(&["c", "d"]));
        path = path.extend(Value::Int(3), labels(&["e"]));

        path = path.retract(&labels(&["b"]));
        assert_eq!(path.size(), 3);
        assert_eq!(path.objects(), vec![Value::Int(1), Value::Int(3), Value::Int(3)]);
        assert!(path.has_label("a"));
        assert!(path.has_label("c"));
        assert!(path.has_label("d"));
        assert!(path.has_label("e"));
    }
}

#[test]
fn sub_path_objects_match_object_slice() {
    for make in factories() {
        let mut path = make();
        path = path.extend(Value::Int(10), labels(&["a"]));
        path = path.extend(Value::Int(20), labels(&["b"]));
        path = path.extend(Value::Int(30), labels(&["c"]));
        path = path.extend(Value::Int(40), labels(&["d"]));

        let objects = path.objects();
        let bounds = [("a", 0), ("b", 1), ("c", 2), ("d", 3)];
        for (from, i) in bounds {
            for (to, j) in bounds {
                if i > j {
                    continue;
                }
                let sub = path.sub_path(Some(from), Some(to)).unwrap();
                assert_eq!(sub.objects(), objects[i..=j].to_vec());
            }
        }
    }
}
