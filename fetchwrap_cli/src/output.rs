use fetchwrap_lib::{ApiError, User};
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn print_users_table(users: &[User]) {
    println!("{}", Table::new(build_user_rows(users)));
}

pub fn print_users(users: &[User], format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_users_table(users),
        OutputFormat::Json => print_json(&users),
    }
}

pub fn print_user(user: &User, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_users_table(std::slice::from_ref(user)),
        OutputFormat::Json => print_json(user),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// One-line report of a request failure: status first, then the message.
pub fn format_api_error(err: &ApiError) -> String {
    format!("Error {}: {}", err.status_code(), err.message())
}

/// Formats `err` if it wraps a request failure; other errors are left to anyhow.
pub fn describe_api_failure(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<fetchwrap_lib::Error>()
        .and_then(fetchwrap_lib::Error::api)
        .or_else(|| err.downcast_ref::<ApiError>())
        .map(format_api_error)
}
