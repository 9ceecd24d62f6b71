//! HTML pages.
//!
//! Pages are assembled from plain strings; every user-supplied value goes
//! through [`escape`].

use axum::response::Html;

use crate::auth::SessionUser;
use crate::db::{Fruit, READY_FIELD};

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

/// Home page. Shows the signed-in user, if any.
pub fn home_page(user: Option<&SessionUser>) -> Html<String> {
    let body = match user {
        Some(user) => format!(
            "<h1>Welcome to the app, {}.</h1>\n\
             <p><a href=\"/vip-lounge\">VIP Lounge</a> | <a href=\"/fruits\">Fruits</a> | \
             <a href=\"/auth/sign-out\">Sign Out</a></p>",
            escape(&user.username)
        ),
        None => "<h1>Welcome to the app.</h1>\n\
                 <p><a href=\"/auth/sign-up\">Sign Up</a> | <a href=\"/auth/sign-in\">Sign In</a></p>"
            .to_string(),
    };
    layout("Home", &body)
}

/// Registration form.
pub fn sign_up_page() -> Html<String> {
    layout(
        "Sign Up",
        "<h1>Create a new account</h1>\n\
         <form action=\"/auth/sign-up\" method=\"POST\">\n\
         <label for=\"username\">Username:</label>\n\
         <input type=\"text\" name=\"username\" id=\"username\" required>\n\
         <label for=\"password\">Password:</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n\
         <label for=\"confirmPassword\">Confirm Password:</label>\n\
         <input type=\"password\" name=\"confirmPassword\" id=\"confirmPassword\" required>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>",
    )
}

/// Login form.
pub fn sign_in_page() -> Html<String> {
    layout(
        "Sign In",
        "<h1>Sign in</h1>\n\
         <form action=\"/auth/sign-in\" method=\"POST\">\n\
         <label for=\"username\">Username:</label>\n\
         <input type=\"text\" name=\"username\" id=\"username\" required>\n\
         <label for=\"password\">Password:</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>",
    )
}

/// List of all fruits.
pub fn fruit_index_page(fruits: &[Fruit]) -> Html<String> {
    let items: String = fruits
        .iter()
        .map(|fruit| {
            format!(
                "<li><a href=\"/fruits/{}\">{}</a></li>\n",
                fruit.id,
                escape(&fruit.name)
            )
        })
        .collect();
    let body = format!(
        "<h1>All Fruits</h1>\n<ul>\n{items}</ul>\n<a href=\"/fruits/new\">Add a new fruit</a>"
    );
    layout("All Fruits", &body)
}

/// Form for a new fruit.
pub fn fruit_new_page() -> Html<String> {
    let body = format!(
        "<h1>Create a new fruit</h1>\n\
         <form action=\"/fruits\" method=\"POST\">\n\
         <label for=\"name\">Name:</label>\n\
         <input type=\"text\" name=\"name\" id=\"name\">\n\
         <label for=\"{READY_FIELD}\">Ready to eat?</label>\n\
         <input type=\"checkbox\" name=\"{READY_FIELD}\" id=\"{READY_FIELD}\">\n\
         <button type=\"submit\">Add fruit</button>\n\
         </form>"
    );
    layout("New Fruit", &body)
}

fn fruit_missing() -> Html<String> {
    layout("Fruit", "<h1>No fruit found.</h1>\n<a href=\"/fruits\">Back to fruits</a>")
}

/// Detail page for a fruit; `None` renders an empty record.
pub fn fruit_show_page(fruit: Option<&Fruit>) -> Html<String> {
    let Some(fruit) = fruit else {
        return fruit_missing();
    };

    let readiness = if fruit.is_ready_to_eat {
        "It is ready to eat!"
    } else {
        "It is not ready to eat."
    };
    let extra: String = fruit
        .extra
        .iter()
        .map(|(key, value)| {
            let value = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            format!("<li>{}: {}</li>\n", escape(key), escape(&value))
        })
        .collect();

    let body = format!(
        "<h1>{name}</h1>\n<p>{readiness}</p>\n<ul>\n{extra}</ul>\n\
         <a href=\"/fruits/{id}/edit\">Edit {name}</a>\n\
         <form action=\"/fruits/{id}?_method=DELETE\" method=\"POST\">\n\
         <button type=\"submit\">Delete {name}</button>\n\
         </form>\n\
         <a href=\"/fruits\">Back to fruits</a>",
        name = escape(&fruit.name),
        id = fruit.id,
    );
    layout(&fruit.name, &body)
}

/// Edit form for a fruit; `None` renders an empty record.
pub fn fruit_edit_page(fruit: Option<&Fruit>) -> Html<String> {
    let Some(fruit) = fruit else {
        return fruit_missing();
    };

    let checked = if fruit.is_ready_to_eat { " checked" } else { "" };
    let body = format!(
        "<h1>Edit {name}</h1>\n\
         <form action=\"/fruits/{id}?_method=PUT\" method=\"POST\">\n\
         <label for=\"name\">Name:</label>\n\
         <input type=\"text\" name=\"name\" id=\"name\" value=\"{name}\">\n\
         <label for=\"{READY_FIELD}\">Ready to eat?</label>\n\
         <input type=\"checkbox\" name=\"{READY_FIELD}\" id=\"{READY_FIELD}\"{checked}>\n\
         <button type=\"submit\">Update fruit</button>\n\
         </form>",
        name = escape(&fruit.name),
        id = fruit.id,
    );
    layout("Edit Fruit", &body)
}
