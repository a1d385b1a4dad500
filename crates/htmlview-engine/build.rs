use std::fs;

fn main() {
    // Validate the built-in style sheet at compile time
    let styles_path = "src/style/default_styles.toml";
    println!("cargo:rerun-if-changed={}", styles_path);

    let content = fs::read_to_string(styles_path).expect("Failed to read default_styles.toml");

    // Every top-level entry must be a style class table
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_styles.toml: {}", e),
    };
    for (class, value) in &table {
        if !value.is_table() {
            panic!("Style class `{}` in default_styles.toml is not a table", class);
        }
    }
}
