use maud::{html, Markup};

pub mod error;

pub use error::html_error_response;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn address_form() -> Markup {
    html! {
        form id="lookup-form" class="lookup-form" {
            label class="sr-only" for="address" { "Property address" }
            input
                type="text"
                id="address"
                name="address"
                placeholder="50 N Duke St, Lancaster, PA 17602"
                autocomplete="street-address"
                required;
            button type="submit" { "Look up" }
        }
    }
}
