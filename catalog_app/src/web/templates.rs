// catalog_app/src/web/templates.rs

//! Page templates, compiled into the binary so the server does not depend on its working directory.

use crate::errors::Result;
use tera::{Context, Tera};

pub const LISTAR: &str = "listar.html";
pub const LISTAR_HEAD: &str = "listar_head.html";
pub const LISTAR_TAIL: &str = "listar_tail.html";
pub const PRODUCTO_ROW: &str = "producto_row.html";
pub const VER: &str = "ver.html";
pub const FORM: &str = "form.html";

pub fn load() -> std::result::Result<Tera, tera::Error> {
  let mut tera = Tera::default();
  tera.add_raw_templates(vec![
    ("base.html", include_str!("../../templates/base.html")),
    (PRODUCTO_ROW, include_str!("../../templates/producto_row.html")),
    (LISTAR, include_str!("../../templates/listar.html")),
    (LISTAR_HEAD, include_str!("../../templates/listar_head.html")),
    (LISTAR_TAIL, include_str!("../../templates/listar_tail.html")),
    (VER, include_str!("../../templates/ver.html")),
    (FORM, include_str!("../../templates/form.html")),
  ])?;
  Ok(tera)
}

pub fn render(tera: &Tera, template: &str, ctx: &Context) -> Result<String> {
  Ok(tera.render(template, ctx)?)
}
