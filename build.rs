use std::fs;

// Keys `Config::compiled_default()` reads from the shipped table.
const STRING_ARRAYS: &[(&str, &str)] = &[
    ("tags", "bold"),
    ("tags", "italic"),
    ("tags", "block"),
    ("display", "block"),
    ("origin", "markers"),
];

fn main() {
    // Validate the shipped style table at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for (section, key) in STRING_ARRAYS {
        let value = table.get(*section).and_then(|s| s.get(*key));
        let is_string_array = value
            .and_then(|v| v.as_array())
            .is_some_and(|items| items.iter().all(|item| item.is_str()));
        if !is_string_array {
            panic!("default_config.toml: [{}] {} must be an array of strings", section, key);
        }
    }

    let threshold = table
        .get("weight")
        .and_then(|s| s.get("bold_threshold"))
        .and_then(|v| v.as_integer());
    if !threshold.is_some_and(|t| (0..=i64::from(u16::MAX)).contains(&t)) {
        panic!("default_config.toml: [weight] bold_threshold must be an integer in u16 range");
    }
}
