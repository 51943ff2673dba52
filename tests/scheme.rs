use indexmap::IndexMap;
use serde_json::json;

use schemes::{
    Container, ErrorClass, ErrorKind, Key, MapKey, PathSegment, Scheme, SchemaError, Spec, Type,
    Validator, Value,
};

fn person_scheme() -> Scheme {
    let below_eight = Spec::predicate("below_eight", |v: &Value| v.as_f64().is_some_and(|x| x < 8.0));
    let ten_chars = Spec::predicate("ten_chars", |v: &Value| v.len() == Some(10));
    Scheme::new(Spec::mapping([
        ("height", Spec::all([Spec::any([Type::Int, Type::Float]), below_eight])),
        ("name", Spec::from(Type::Str)),
        ("phone", Spec::all([Spec::from(Type::Str), ten_chars])),
        ("likes", Spec::optional(Type::Map, Value::Map(IndexMap::new()))),
    ]))
    .unwrap()
}

fn samples() -> Vec<Value> {
    [
        json!(null), json!(true), json!(0), json!(-3), json!(2.5), json!("s"),
        json!([]), json!([1, "a"]), json!({}), json!({"k": 1}),
    ]
    .into_iter()
    .map(Value::from)
    .chain([Value::Tuple(vec![Value::Int(1)]), Value::Tuple(vec![])])
    .collect()
}

#[test]
fn type_specs_accept_exactly_their_instances() {
    for ty in [Type::Null, Type::Bool, Type::Int, Type::Float, Type::Number, Type::Str,
               Type::List, Type::Tuple, Type::Sequence, Type::Map, Type::Any] {
        let scheme = Scheme::new(ty.into()).unwrap();
        for value in samples() {
            let accepted = ty.accepts(&value);
            let result = scheme.validate(value.clone());
            assert_eq!(result.is_ok(), accepted, "{} vs {value}", ty.name());
            match result {
                Ok(out) => assert_eq!(out, value),
                Err(err) => assert_eq!(err.kind(), ErrorKind::TypeMismatch),
            }
        }
    }
}

#[test]
fn literal_specs_accept_exactly_equal_values() {
    for literal in samples() {
        let scheme = Scheme::new(Spec::Literal(literal.clone())).unwrap();
        for value in samples() {
            let result = scheme.validate(value.clone());
            assert_eq!(result.is_ok(), value == literal, "{literal} vs {value}");
            if let Err(err) = result {
                assert_eq!(err.kind(), ErrorKind::ValueMismatch);
            }
        }
    }
}

#[test]
fn numeric_literals_compare_exactly() {
    let big = Scheme::new(Spec::Literal(Value::Int(9_007_199_254_740_993))).unwrap();
    assert_eq!(
        big.validate(Value::from(9_007_199_254_740_992.0)).unwrap_err().kind(),
        ErrorKind::ValueMismatch
    );
    assert!(big.validate(Value::Int(9_007_199_254_740_993)).is_ok());

    let nan = Scheme::new(Spec::Literal(Value::from(f64::NAN))).unwrap();
    assert!(nan.validate(Value::from(f64::NAN)).is_err());

    let one = Scheme::new(Spec::from(1)).unwrap();
    assert_eq!(one.validate(Value::from(1.0)).unwrap(), Value::Int(1));
}

#[test]
fn all_fails_with_the_first_failing_childs_error() {
    let children = || vec![Spec::from(Type::Number), Spec::predicate("positive", |v: &Value| {
        v.as_f64().is_some_and(|x| x > 0.0)
    })];
    let all = Scheme::new(Spec::All(children())).unwrap();
    for value in samples() {
        let first_failure = children()
            .into_iter()
            .map(|spec| Scheme::new(spec).unwrap().validate(value.clone()))
            .find_map(Result::err);
        match (all.validate(value.clone()), first_failure) {
            (Ok(out), None) => assert_eq!(out, value),
            (Err(err), Some(expected)) => assert_eq!(err, expected),
            (got, expected) => panic!("{value}: got {got:?}, expected failure {expected:?}"),
        }
    }
}

#[test]
fn any_succeeds_iff_some_child_does() {
    let any = Scheme::new(Spec::any([Spec::from(Type::Str), Spec::from(0), Spec::from(Type::Tuple)])).unwrap();
    for value in samples() {
        let expected = matches!(value, Value::Str(_) | Value::Tuple(_)) || value == Value::Int(0);
        match any.validate(value.clone()) {
            Ok(out) => {
                assert!(expected, "{value}");
                assert_eq!(out, value);
            }
            Err(err) => {
                assert!(!expected, "{value}");
                assert_eq!(err.kind(), ErrorKind::NoAlternative);
                assert_eq!(err.alternatives().len(), 3);
            }
        }
    }
}

#[test]
fn sequence_example() {
    let scheme = Scheme::new(Spec::list([Spec::from(Type::Str), Spec::from(Type::Int), Spec::any([2, 3, 4])])).unwrap();

    let input = Value::from(json!(["hello", 2, 4]));
    let out = scheme.validate(input.clone()).unwrap();
    assert_eq!(out, input);
    assert_eq!(out.container(), Some(Container::List));

    let err = scheme.validate(Value::from(json!(["hello", 2, 5]))).unwrap_err();
    assert_eq!(err.kind().class(), ErrorClass::Content);
    assert_eq!(err.path(), &[PathSegment::Index(2)]);

    let err = scheme.validate(Value::from(json!([10, 2, 4]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.path(), &[PathSegment::Index(0)]);
}

#[test]
fn sequence_output_keeps_the_input_container() {
    let scheme = Scheme::new(Spec::tuple([Type::Int, Type::Str]).ignore_type()).unwrap();
    for input in [
        Value::Tuple(vec![1.into(), "a".into()]),
        Value::List(vec![1.into(), "a".into()]),
    ] {
        let out = scheme.validate(input.clone()).unwrap();
        assert_eq!(out.container(), input.container());
        assert_eq!(out, input);
    }
}

#[test]
fn optional_checks_or_defaults() {
    let Validator::Optional(optional) = Validator::create(Spec::optional(Type::Str, "hello")).unwrap() else {
        panic!("expected an optional node");
    };
    assert_eq!(optional.validate(Some("world".into())).unwrap(), Value::from("world"));
    assert_eq!(optional.validate(None).unwrap(), Value::from("hello"));
    assert_eq!(optional.validate(Some(10.into())).unwrap_err().kind(), ErrorKind::TypeMismatch);
}

#[test]
fn mapping_example_passes_unchanged() {
    let value = Value::from(json!({
        "height": 6.7,
        "name": "bob",
        "phone": "0123456789",
        "likes": {"movie": "Inglourious Basterds"}
    }));
    assert_eq!(person_scheme().validate(value.clone()).unwrap(), value);
}

#[test]
fn mapping_example_backfills_absent_optional_keys() {
    let out = person_scheme()
        .validate(Value::from(json!({"height": 5, "name": "bob", "phone": "0123456789"})))
        .unwrap();
    assert_eq!(
        out,
        Value::from(json!({"height": 5, "name": "bob", "phone": "0123456789", "likes": {}}))
    );
    // idempotent
    assert_eq!(person_scheme().validate(out.clone()).unwrap(), out);
}

#[test]
fn mapping_example_failures() {
    let scheme = person_scheme();

    let err = scheme.validate(Value::from(json!({"name": "bob", "phone": "0123456789"}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKey);
    assert_eq!(err.to_string(), "missing key 'height'");

    let err = scheme
        .validate(Value::from(json!({"height": 6, "name": "bob", "phone": 1234567890})))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.to_string(), "at key 'phone' (expected type: 'str', got 'int')");

    let err = scheme
        .validate(Value::from(json!({"height": 9, "name": "bob", "phone": "1234567890"})))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredicateFailed);
    assert_eq!(err.to_string(), "at key 'height' (validator 'below_eight' failed for value '9')");

    let err = scheme
        .validate(Value::from(json!({
            "height": 6, "name": "bob", "phone": "1234567890", "balh-not-allowed": "hello"
        })))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownKey);
    assert_eq!(err.path(), &[PathSegment::Key(Key::from("balh-not-allowed"))]);
}

#[test]
fn backfill_inside_all_is_kept() {
    let scheme = Scheme::new(Spec::all([
        Spec::mapping([("a", Spec::optional(Type::Int, 1))]),
        Spec::from(Validator::length(1)),
    ]))
    .unwrap();
    assert_eq!(scheme.validate(Value::from(json!({}))).unwrap(), Value::from(json!({"a": 1})));
}

#[test]
fn type_catch_all_keys_are_never_required() {
    let scheme = Scheme::new(Spec::mapping([(MapKey::from(Type::Str), Spec::from(Type::Int))])).unwrap();
    assert!(scheme.validate(Value::from(json!({}))).is_ok());
    assert!(scheme.validate(Value::from(json!({"x": 1, "y": 2}))).is_ok());
    assert_eq!(
        scheme.validate(Value::from(json!({"x": "1"}))).unwrap_err().pointer(),
        "/x"
    );
}

#[test]
fn validate_many_keeps_input_order() {
    let scheme = Scheme::new(Spec::from(Type::Int)).unwrap();
    let values = (0..64).map(|i| if i % 3 == 0 { Value::from("x") } else { Value::Int(i) }).collect();
    let results = scheme.validate_many(values);
    assert_eq!(results.len(), 64);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.is_ok(), i % 3 != 0);
    }
}

#[test]
fn construction_errors() {
    assert!(matches!(Scheme::new(Spec::pattern("[")), Err(SchemaError::InvalidPattern { .. })));
    assert!(matches!(
        Scheme::new(Spec::list([Spec::mapping([("a", 1)])])),
        Err(SchemaError::UnsupportedPosition { index: 0, .. })
    ));
    assert!(matches!(
        Scheme::new(Spec::any([Spec::mapping([("a", 1), ("a", 2)])])),
        Err(SchemaError::DuplicateKey(_))
    ));
}

#[test]
fn schemes_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Scheme>();
    let scheme = std::sync::Arc::new(person_scheme());
    let handles = (0..4)
        .map(|i| {
            let scheme = scheme.clone();
            std::thread::spawn(move || {
                let value = Value::from(json!({"height": i, "name": "n", "phone": "0123456789"}));
                scheme.validate(value).is_ok()
            })
        })
        .collect::<Vec<_>>();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));
}
