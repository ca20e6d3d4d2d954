use attrbind::{
    context::Context,
    diag::DiagnosticClass,
    error::HookError,
    options::{Options, UnmatchedAttributes},
    path::Path,
    prelude::*,
    reflect::{Nullable, ValueHolder, from_native, into_native},
    types::{BoolType, ListType, MapType, NumberType, ObjectType, StringType},
};
use std::collections::BTreeMap;

///
/// Volume
///

#[derive(Bind, Clone, Debug, Default, PartialEq)]
struct Volume {
    #[attr("size_gb")]
    size_gb: u32,
    #[attr("encrypted")]
    encrypted: bool,
}

///
/// Instance
///

#[derive(Bind, Clone, Debug, Default, PartialEq)]
struct Instance {
    #[attr("name")]
    name: String,
    #[attr("image")]
    image: Option<String>,
    #[attr("volumes")]
    volumes: Vec<Volume>,
    #[attr("tags")]
    tags: BTreeMap<String, String>,
    #[attr("-")]
    cached_id: Option<u64>,
}

fn volume_type() -> ObjectType {
    ObjectType::new()
        .with_attribute("size_gb", NumberType)
        .with_attribute("encrypted", BoolType)
}

fn instance_type() -> ObjectType {
    ObjectType::new()
        .with_attribute("name", StringType)
        .with_attribute("image", StringType)
        .with_attribute("volumes", ListType::of(volume_type()))
        .with_attribute("tags", MapType::of(StringType))
}

fn instance_raw() -> RawValue {
    RawValue::object([
        ("name", RawValue::from("web-1")),
        ("image", RawValue::Null),
        (
            "volumes",
            RawValue::List(vec![RawValue::object([
                ("size_gb", RawValue::from(20i64)),
                ("encrypted", RawValue::from(true)),
            ])]),
        ),
        ("tags", RawValue::map([("env", RawValue::from("prod"))])),
    ])
}

#[test]
fn nested_structure_binds_end_to_end() {
    let mut instance = Instance {
        cached_id: Some(9),
        ..Instance::default()
    };

    let diags = into_native(
        &Context::background(),
        &instance_type(),
        &instance_raw(),
        &mut instance,
        Options::default(),
    );

    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(
        instance,
        Instance {
            name: "web-1".to_string(),
            image: None,
            volumes: vec![Volume {
                size_gb: 20,
                encrypted: true,
            }],
            tags: BTreeMap::from([("env".to_string(), "prod".to_string())]),
            cached_id: Some(9),
        }
    );
}

#[test]
fn nested_structure_reads_back_to_the_same_raw_value() {
    let ctx = Context::background();
    let mut instance = Instance::default();
    let diags = into_native(
        &ctx,
        &instance_type(),
        &instance_raw(),
        &mut instance,
        Options::default(),
    );
    assert!(diags.is_empty(), "{diags:#?}");

    let (value, diags) = from_native(&ctx, &instance_type(), &instance, Options::default());

    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(value.expect("value").to_raw(), Ok(instance_raw()));
}

#[test]
fn every_failing_leaf_is_reported_in_one_pass() {
    let raw = RawValue::object([
        ("name", RawValue::Unknown),
        ("image", RawValue::from("debian")),
        (
            "volumes",
            RawValue::List(vec![
                RawValue::object([
                    ("size_gb", RawValue::from(-5i64)),
                    ("encrypted", RawValue::from(false)),
                ]),
                RawValue::object([
                    ("size_gb", RawValue::from(10i64)),
                    ("encrypted", RawValue::Null),
                ]),
            ]),
        ),
        ("tags", RawValue::map([("env", RawValue::from("dev"))])),
    ]);

    let mut instance = Instance::default();
    let ctx = Context::background();
    let opts = Options::default();
    let diags = into_native(&ctx, &instance_type(), &raw, &mut instance, opts);

    let paths: Vec<String> = diags
        .iter()
        .filter_map(|diag| diag.path().map(ToString::to_string))
        .collect();
    assert_eq!(
        paths,
        ["name", "volumes[0].size_gb", "volumes[1].encrypted"]
    );
    for diag in diags.iter() {
        assert_eq!(diag.class(), Some(DiagnosticClass::ShapeMismatch));
    }

    // siblings of the failures are still populated
    assert_eq!(instance.image.as_deref(), Some("debian"));
    assert_eq!(instance.volumes[1].size_gb, 10);
    assert_eq!(instance.tags["env"], "dev");
}

#[test]
fn relaxed_options_load_from_json() {
    let opts: Options = serde_json::from_str(
        r#"{ "unhandled_null_as_empty": true, "unhandled_unknown_as_empty": true }"#,
    )
    .expect("options");
    let raw = RawValue::object([
        ("name", RawValue::Unknown),
        ("image", RawValue::Unknown),
        ("volumes", RawValue::Null),
        ("tags", RawValue::Null),
    ]);

    let mut instance = Instance {
        name: "old".to_string(),
        volumes: vec![Volume::default()],
        ..Instance::default()
    };
    let ctx = Context::background();
    let diags = into_native(&ctx, &instance_type(), &raw, &mut instance, opts);

    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(instance, Instance::default());
}

// ============================================================================
// Generic structures
// ============================================================================

///
/// Pair
///

#[derive(Bind, Debug, Default, PartialEq)]
struct Pair<T> {
    #[attr("left")]
    left: T,
    #[attr("right")]
    right: T,
}

#[test]
fn generic_structures_bind_per_instantiation() {
    let ctx = Context::background();

    let typ = ObjectType::new()
        .with_attribute("left", NumberType)
        .with_attribute("right", NumberType);
    let raw = RawValue::object([
        ("left", RawValue::from(1i64)),
        ("right", RawValue::from(2i64)),
    ]);
    let mut numbers = Pair::<i16>::default();
    let diags = into_native(&ctx, &typ, &raw, &mut numbers, Options::default());
    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(numbers, Pair { left: 1, right: 2 });

    let typ = ObjectType::new()
        .with_attribute("left", StringType)
        .with_attribute("right", StringType);
    let raw = RawValue::object([
        ("left", RawValue::from("a")),
        ("right", RawValue::from("b")),
    ]);
    let mut strings = Pair::<String>::default();
    let diags = into_native(&ctx, &typ, &raw, &mut strings, Options::default());
    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(strings.right, "b");
}

// ============================================================================
// Hooks from outside the crate
// ============================================================================

///
/// Secret
///
/// Redacted when read back; null means "not provided".
///

#[derive(Debug, Default, PartialEq)]
struct Secret {
    value: String,
    provided: bool,
}

impl ValueHolder for Secret {
    fn get_value(&self) -> RawValue {
        RawValue::from("********")
    }

    fn set_value(&mut self, value: RawValue) -> Result<(), HookError> {
        match value {
            RawValue::String(v) if !v.is_empty() => {
                self.value = v;
                Ok(())
            }
            _ => Err(HookError::new("secret must be a non-empty string")),
        }
    }
}

impl Nullable for Secret {
    fn get_null(&self) -> bool {
        !self.provided
    }

    fn set_null(&mut self, null: bool) -> Result<(), HookError> {
        self.provided = !null;
        Ok(())
    }
}

attrbind::impl_hooked!(Secret => nullable);

#[derive(Bind, Debug, Default)]
struct Login {
    #[attr("user")]
    user: String,
    #[attr("password")]
    password: Secret,
}

fn login_type() -> ObjectType {
    ObjectType::new()
        .with_attribute("user", StringType)
        .with_attribute("password", StringType)
}

#[test]
fn nullable_hook_owns_its_leaf() {
    let ctx = Context::background();
    let raw = RawValue::object([
        ("user", RawValue::from("root")),
        ("password", RawValue::from("hunter2")),
    ]);

    let mut login = Login::default();
    let diags = into_native(&ctx, &login_type(), &raw, &mut login, Options::default());
    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(login.password.value, "hunter2");
    assert!(login.password.provided);

    let (value, diags) = from_native(&ctx, &login_type(), &login, Options::default());
    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(
        value.expect("value").to_raw(),
        Ok(RawValue::object([
            ("user", RawValue::from("root")),
            ("password", RawValue::from("********")),
        ]))
    );
}

#[test]
fn hook_rejection_is_reported_at_the_leaf() {
    let raw = RawValue::object([
        ("user", RawValue::from("root")),
        ("password", RawValue::from("")),
    ]);

    let mut login = Login::default();
    let ctx = Context::background();
    let diags = into_native(&ctx, &login_type(), &raw, &mut login, Options::default());

    let password = Path::root().with_attribute_name("password");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].path(), Some(&password));
    assert_eq!(diags[0].class(), Some(DiagnosticClass::Hook));
    let detail = diags[0].detail();
    assert!(detail.contains("secret must be a non-empty string"));
    assert_eq!(login.user, "root");
}

#[test]
fn unclaimed_attributes_can_be_ignored() {
    let typ = login_type().with_attribute("mfa", BoolType);
    let raw = RawValue::object([
        ("user", RawValue::from("root")),
        ("password", RawValue::Null),
        ("mfa", RawValue::from(true)),
    ]);
    let opts = Options::default().with_unmatched_attributes(UnmatchedAttributes::Ignore);

    let mut login = Login::default();
    let diags = into_native(&Context::background(), &typ, &raw, &mut login, opts);

    assert!(diags.is_empty(), "{diags:#?}");
    assert_eq!(login.user, "root");
    assert!(!login.password.provided);
}
