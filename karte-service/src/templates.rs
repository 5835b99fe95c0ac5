use std::sync::OnceLock;

use axum::{http::StatusCode, response::Html};
use minijinja::{Environment, Value};
use tracing::error;

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template(
            "select_shop.html",
            include_str!("../templates/select_shop.html"),
        )
        .expect("select_shop template parses");
        env.add_template(
            "input_info.html",
            include_str!("../templates/input_info.html"),
        )
        .expect("input_info template parses");
        env.add_template("result.html", include_str!("../templates/result.html"))
            .expect("result template parses");
        env
    })
}

/// Render a page template, mapping template faults to 500.
pub fn render_page(name: &str, ctx: Value) -> Result<Html<String>, StatusCode> {
    let template = environment().get_template(name).map_err(|e| {
        error!(template = name, error = %e, "template not registered");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    template.render(ctx).map(Html).map_err(|e| {
        error!(template = name, error = %e, "template render failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
