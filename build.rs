use std::collections::HashSet;
use std::path::Path;

fn main() {
    let table_path = Path::new("signatures/signatures.json");
    validate_table_file(table_path);
    set_build_dependencies();
}

fn validate_table_file(table_path: &Path) {
    // Ensure the signature table exists at build time
    assert!(
        table_path.exists(),
        "\n\nSIGNATURE TABLE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the signature table before building.\n",
        table_path.display()
    );

    let contents = std::fs::read_to_string(table_path).unwrap_or_else(|e| {
        panic!(
            "\n\nSIGNATURE TABLE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            table_path.display()
        );
    });

    let table: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nSIGNATURE TABLE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            table_path.display()
        );
    });

    validate_table_structure(&table);
}

fn validate_table_structure(table: &serde_json::Value) {
    assert!(
        table.is_object(),
        "\n\nSIGNATURE TABLE BUILD ERROR: Root must be a JSON object\n\
         Got: {table}\n"
    );

    let entries = table.get("entries").unwrap_or_else(|| {
        panic!(
            "\n\nSIGNATURE TABLE BUILD ERROR: Missing 'entries' field\n\
             The table must have a top-level 'entries' array.\n"
        );
    });

    let entries = entries.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nSIGNATURE TABLE BUILD ERROR: 'entries' must be an array\n\
             Got: {entries}\n"
        );
    });

    let parsed = validate_entries(entries);
    validate_no_overlaps(&parsed);

    let total_patterns: usize = parsed.iter().map(|(_, patterns)| patterns.len()).sum();
    println!(
        "cargo:warning=Validated signature table: {} types, {total_patterns} patterns",
        parsed.len()
    );
}

fn validate_entries(entries: &[serde_json::Value]) -> Vec<(String, Vec<Vec<u8>>)> {
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let type_id = entry
            .get("type_id")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!("\n\nSIGNATURE TABLE BUILD ERROR: Entry at index {i} missing 'type_id' field\n")
            });

        assert!(
            !type_id.is_empty()
                && type_id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
            "\n\nSIGNATURE TABLE BUILD ERROR: Entry at index {i} has invalid type id '{type_id}'\n\
             Type ids must be non-empty lowercase ASCII letters or digits.\n"
        );
        assert!(
            seen.insert(type_id.to_string()),
            "\n\nSIGNATURE TABLE BUILD ERROR: Duplicate type id '{type_id}' (index {i})\n"
        );

        let patterns = entry
            .get("patterns")
            .and_then(|v| v.as_array())
            .unwrap_or_else(|| {
                panic!("\n\nSIGNATURE TABLE BUILD ERROR: Entry '{type_id}' missing 'patterns' array\n")
            });
        assert!(
            !patterns.is_empty(),
            "\n\nSIGNATURE TABLE BUILD ERROR: Entry '{type_id}' has no patterns\n"
        );

        let bytes = patterns
            .iter()
            .map(|p| {
                let text = p.as_str().unwrap_or_else(|| {
                    panic!("\n\nSIGNATURE TABLE BUILD ERROR: Entry '{type_id}' has a non-string pattern\n")
                });
                parse_pattern(type_id, text)
            })
            .collect();

        parsed.push((type_id.to_string(), bytes));
    }

    parsed
}

fn parse_pattern(type_id: &str, text: &str) -> Vec<u8> {
    let trimmed = text.strip_suffix(' ').unwrap_or(text);
    assert!(
        !trimmed.is_empty(),
        "\n\nSIGNATURE TABLE BUILD ERROR: Entry '{type_id}' has an empty pattern\n"
    );

    trimmed
        .split(' ')
        .map(|group| {
            assert!(
                group.len() == 2 && group.chars().all(|c| c.is_ascii_hexdigit()),
                "\n\nSIGNATURE TABLE BUILD ERROR: Entry '{type_id}' pattern '{text}' has invalid octet '{group}'\n\
                 Patterns are two-digit hex octets separated by single spaces.\n"
            );
            u8::from_str_radix(group, 16).unwrap_or_default()
        })
        .collect()
}

fn validate_no_overlaps(parsed: &[(String, Vec<Vec<u8>>)]) {
    for (i, (left_id, left_patterns)) in parsed.iter().enumerate() {
        for (right_id, right_patterns) in &parsed[i + 1..] {
            for left in left_patterns {
                for right in right_patterns {
                    assert!(
                        !(left.starts_with(right) || right.starts_with(left)),
                        "\n\nSIGNATURE TABLE BUILD ERROR: Patterns of '{left_id}' and '{right_id}' overlap\n\
                         A file could match both types; make the patterns disjoint.\n"
                    );
                }
            }
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the signature table changes
    println!("cargo:rerun-if-changed=signatures/signatures.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
