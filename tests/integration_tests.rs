use serde::{Deserialize, Serialize};
use serde_toml_lite::{
    from_json, from_slice, from_str, from_value, parse, to_json, to_string, to_value, ErrorKind,
    Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Config {
    title: String,
    owner: Owner,
    database: Database,
    servers: Vec<Server>,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Owner {
    name: String,
    dob: String,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Database {
    enabled: bool,
    ports: Vec<u16>,
    temp_targets: TempTargets,
}

#[derive(Deserialize, Debug, PartialEq)]
struct TempTargets {
    cpu: f64,
    case: f64,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Server {
    ip: String,
    role: Role,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Role {
    Frontend,
    Backend,
}

const CONFIG: &str = r#"
# This is a TOML document

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
temp_targets = { cpu = 79.5, case = 72.0 }

[[servers]]
ip = "10.0.0.1"
role = "frontend"

[[servers]]
ip = "10.0.0.2"
role = "backend"
"#;

#[test]
fn test_typed_config() {
    let config: Config = from_str(CONFIG).unwrap();
    assert_eq!(config.title, "TOML Example");
    assert_eq!(config.owner.dob, "1979-05-27T07:32:00-08:00");
    assert!(config.database.enabled);
    assert_eq!(config.database.ports, vec![8000, 8001, 8002]);
    assert_eq!(config.database.temp_targets.case, 72.0);
    assert_eq!(config.servers.len(), 2);
    assert_eq!(config.servers[1].role, Role::Backend);
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "id = 123\nname = \"Alice\"\nactive = true\ntags = [\"admin\", \"developer\"]\n"
    );

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct_through_inline_tables() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.5,
                quantity: 1,
            },
        ],
        total: 109.48,
    };

    let text = to_string(&order).unwrap();
    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_value_round_trip_through_serde() {
    let root = parse(CONFIG).unwrap();
    let via_serde: Value = from_value(to_value(&root).unwrap()).unwrap();
    // Datetimes come back as plain strings.
    assert_eq!(
        via_serde.get("owner").and_then(|o| o.get("dob")),
        Some(&Value::from("1979-05-27T07:32:00-08:00"))
    );
    assert_eq!(via_serde.get("servers"), root.get("servers"));
}

#[test]
fn test_json_bridge() {
    let root = parse(CONFIG).unwrap();
    let json = to_json(&root);
    assert_eq!(json["database"]["ports"][2], 8002);
    assert_eq!(json["servers"][0]["ip"], "10.0.0.1");

    let back = from_json(&json).unwrap();
    assert_eq!(back.get("database"), root.get("database"));

    let err = from_json(&serde_json::json!({ "a": null })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_missing_and_mistyped_fields() {
    let err = from_str::<User>("id = 1\nname = \"x\"\nactive = true").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKey);
    assert_eq!(err.to_string(), "Missing key: tags");

    let err = from_str::<User>("id = \"one\"\nname = \"x\"\nactive = true\ntags = []").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_parse_errors_pass_through_from_str() {
    let err = from_str::<User>("id = 1\nid = 2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}

#[test]
fn test_from_slice_with_utf16_bom() {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in "id = 7\nname = \"é\"\nactive = false\ntags = []".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    let user: User = from_slice(&bytes).unwrap();
    assert_eq!(user.name, "é");
    assert_eq!(user.id, 7);
}

#[test]
fn test_require() {
    let root = parse("[server]\nport = 1").unwrap();
    assert!(root.require("server").is_ok());
    let err = root.require("client").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKey);
}
