use crate::{
    attr::{AttrType, AttrValue, TypeRef, ValueRef, value_to_raw},
    error::ConversionError,
    raw::{Number, RawType, RawValue},
    types::{
        BoolType, BoolValue, ListType, ListValue, MapType, MapValue, NumberType, NumberValue,
        ObjectType, ObjectValue, StringType, StringValue,
    },
};
use std::{collections::BTreeMap, sync::Arc};

fn server_type() -> ObjectType {
    ObjectType::new()
        .with_attribute("name", StringType)
        .with_attribute("ports", ListType::of(NumberType))
        .with_attribute("labels", MapType::of(StringType))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn scalar_values_keep_null_unknown_and_known_apart() {
    let typ = StringType;

    let null = typ.value_from_raw(&RawValue::Null).unwrap();
    let unknown = typ.value_from_raw(&RawValue::Unknown).unwrap();
    let known = typ.value_from_raw(&RawValue::from("alice")).unwrap();

    assert!(null.is_null() && !null.is_unknown());
    assert!(unknown.is_unknown() && !unknown.is_null());
    assert_eq!(
        known.downcast_ref::<StringValue>(),
        Some(&StringValue::new("alice"))
    );
    assert!(!null.equal(&*unknown));
}

#[test]
fn scalar_type_rejects_other_kinds() {
    let err = BoolType.value_from_raw(&RawValue::from("yes")).unwrap_err();

    assert_eq!(
        err,
        ConversionError::UnexpectedShape {
            type_name: "BoolType",
            found: "string",
        }
    );
}

#[test]
fn values_of_different_types_are_never_equal() {
    let string: ValueRef = Box::new(StringValue::null());
    let bool_: ValueRef = Box::new(BoolValue::null());

    assert!(!string.equal(&*bool_));
    assert!(!StringType.equal(&BoolType));
    assert!(NumberType.equal(&NumberType));
}

#[test]
fn number_values_compare_numerically() {
    let a: ValueRef = Box::new(NumberValue::new(3i64));
    let b: ValueRef = Box::new(NumberValue::new(Number::Float(3.0)));

    assert!(a.equal(&*b));
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn list_type_builds_elements_with_element_type() {
    let typ = ListType::of(StringType);
    let raw = RawValue::from(vec!["a", "b"]);

    let value = typ.value_from_raw(&raw).unwrap();
    let list = value.downcast_ref::<ListValue>().unwrap();

    assert_eq!(list.elements().map(<[ValueRef]>::len), Some(2));
    assert_eq!(value.to_raw().unwrap(), raw);
    let elem = typ.element_type().expect("element type");
    assert!(elem.equal(&StringType));
}

#[test]
fn list_value_rejects_foreign_elements() {
    let elem: TypeRef = Arc::new(StringType);
    let err = ListValue::new(elem, vec![Box::new(BoolValue::new(true))]).unwrap_err();

    assert!(matches!(err, ConversionError::ElementType { .. }));
}

#[test]
fn list_types_compare_by_element_type() {
    assert!(ListType::of(StringType).equal(&ListType::of(StringType)));
    assert!(!ListType::of(StringType).equal(&ListType::of(BoolType)));
    assert!(!ListType::of(StringType).equal(&MapType::of(StringType)));
    assert!(MapType::of(NumberType) == MapType::of(NumberType));
    assert!(MapType::of(NumberType) != MapType::of(StringType));
}

#[test]
fn collection_values_compare_element_type_and_state() {
    let strings: TypeRef = Arc::new(StringType);
    let bools: TypeRef = Arc::new(BoolType);
    let known = |elem: &TypeRef| {
        ListValue::new(elem.clone(), vec![Box::new(StringValue::new("a"))]).unwrap()
    };

    assert!(known(&strings) == known(&strings));
    assert!(known(&strings) != ListValue::null(strings.clone()));
    let null_strings = ListValue::null(strings.clone());
    assert!(null_strings != ListValue::null(bools.clone()));
    let unknown_bools = MapValue::unknown(bools.clone());
    assert!(unknown_bools == MapValue::unknown(bools.clone()));
    assert!(MapValue::unknown(bools) != MapValue::null(strings));
}

#[test]
fn map_value_lookup() {
    let elem: TypeRef = Arc::new(NumberType);
    let one: ValueRef = Box::new(NumberValue::new(1i64));
    let entries = BTreeMap::from([("a".to_string(), one)]);
    let map = MapValue::new(elem, entries).unwrap();

    assert!(map.get("a").is_some());
    assert!(map.get("b").is_none());
    assert_eq!(
        map.to_raw().unwrap(),
        RawValue::map([("a", RawValue::from(1i64))])
    );
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn object_raw_type_mirrors_attributes() {
    assert_eq!(
        server_type().raw_type(),
        RawType::object([
            ("labels", RawType::map(RawType::String)),
            ("name", RawType::String),
            ("ports", RawType::list(RawType::Number)),
        ])
    );
}

#[test]
fn object_value_from_raw_and_back() {
    let raw = RawValue::object([
        ("name", RawValue::from("web")),
        ("ports", RawValue::from(vec![80i64, 443])),
        ("labels", RawValue::Null),
    ]);

    let value = server_type().value_from_raw(&raw).unwrap();
    let object = value.downcast_ref::<ObjectValue>().unwrap();

    assert_eq!(
        object
            .attribute("name")
            .and_then(|v| v.downcast_ref::<StringValue>().cloned()),
        Some(StringValue::new("web"))
    );
    assert!(object.attribute("labels").is_some_and(|v| v.is_null()));
    assert_eq!(value_to_raw(&*value).unwrap(), raw);
    assert!(value.attr_type().equal(&server_type()));
}

#[test]
fn object_value_from_raw_needs_every_attribute() {
    let raw = RawValue::object([("name", RawValue::from("web"))]);

    assert!(matches!(
        server_type().value_from_raw(&raw),
        Err(ConversionError::Shape(_))
    ));
}

#[test]
fn object_value_new_checks_attribute_types() {
    let typ = ObjectType::new().with_attribute("name", StringType);

    let string: ValueRef = Box::new(StringValue::new("x"));
    let boolean: ValueRef = Box::new(BoolValue::new(true));

    let ok = ObjectValue::new(&typ, BTreeMap::from([("name".to_string(), string)]));
    let wrong = ObjectValue::new(&typ, BTreeMap::from([("name".to_string(), boolean)]));

    assert!(ok.is_ok());
    assert!(wrong.is_err());
    assert!(ObjectValue::null(&typ).is_null());
}

#[test]
fn attribute_type_lookup() {
    let typ: TypeRef = Arc::new(server_type());

    let name = typ.attribute_type("name").expect("declared attribute");
    assert!(name.equal(&StringType));
    assert!(typ.attribute_type("missing").is_none());
    assert!(StringType.attribute_types().is_none());
}
