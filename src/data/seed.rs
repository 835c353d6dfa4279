//! Built-in contents the table starts with

use super::row_record::RowRecord;

pub fn initial_columns() -> Vec<String> {
    ["First Name", "Last Name", "Phone Number", "Email"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

pub fn initial_rows() -> Vec<RowRecord> {
    vec![
        person("Yaroslav", "Baliuk", "0123456789", "yaroslav@gmail.com").with_editing(true),
        person("Maryna", "Vasylyshena", "0123456449", "maryna@gmail.com"),
        person("Max", "Yaroshenko", "0133456789", "max@gmail.com"),
    ]
}

fn person(first: &str, last: &str, phone: &str, email: &str) -> RowRecord {
    RowRecord::new()
        .with_cell("firstName", first)
        .with_cell("lastName", last)
        .with_cell("phoneNumber", phone)
        .with_cell("email", email)
}
