// tests/page_tests.rs
#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use catalog_app::seed;
use common::*;

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
  resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string()
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
  String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_root_redirects_to_listing() {
  let (state, _uploads) = test_state();
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
  assert_eq!(location(&resp), "/productos");
}

#[actix_web::test]
async fn test_listing_shows_uppercased_seed_data_and_flash() {
  let (state, _uploads) = test_state();
  seed::reseed(&state.catalog).await.unwrap();
  let app = init_app!(state);

  let req = test::TestRequest::get()
    .uri("/productos?status=producto+guardado+con+exito")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let html = body_text(resp).await;
  assert!(html.contains("TV PANASONIC PANTALLA LCD"));
  assert!(html.contains("MICA COMODA 5 CAJONES"));
  assert!(html.contains("456.89"));
  assert!(html.contains("producto guardado con exito"));

  // Stored names are untouched by the uppercase listing.
  let stored = state.catalog.list_all().await.unwrap();
  assert_eq!(stored.len(), 9);
  assert_eq!(stored[0].nombre, "TV Panasonic Pantalla LCD");
}

#[actix_web::test]
async fn test_delayed_and_chunked_listings_stream_every_row() {
  let (state, _uploads) = test_state();
  let categoria = saved_categoria(&state, "Electronico").await;
  saved_producto(&state, "Apple iPod", 46.89, &categoria).await;
  saved_producto(&state, "Sony Camara HD Digital", 177.89, &categoria).await;
  let app = init_app!(state);

  let html = body_text(test::call_service(&app, test::TestRequest::get().uri("/productos/listar-delay").to_request()).await).await;
  assert!(html.contains("APPLE IPOD"));
  assert!(html.contains("SONY CAMARA HD DIGITAL"));
  assert!(html.trim_end().ends_with("</html>"));

  // repeat_count is 2 in tests: three passes.
  for uri in ["/productos/listar-chunked", "/productos/listar-full"] {
    let html = body_text(test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await).await;
    assert_eq!(html.matches("APPLE IPOD</a>").count(), 3, "{}", uri);
  }
}

#[actix_web::test]
async fn test_ver_unknown_producto_redirects_with_error() {
  let (state, _uploads) = test_state();
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/productos/ver/zzz").to_request()).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
  assert_eq!(location(&resp), "/productos?error=No+existe+el+producto");

  let resp = test::call_service(&app, test::TestRequest::get().uri("/productos/form/zzz").to_request()).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_ver_and_edit_form_render_producto() {
  let (state, _uploads) = test_state();
  let categoria = saved_categoria(&state, "Deporte").await;
  let producto = saved_producto(&state, "Bianchi Bicicleta", 70.89, &categoria).await;
  let id = producto.id.unwrap();
  let app = init_app!(state);

  let html = body_text(test::call_service(&app, test::TestRequest::get().uri(&format!("/productos/ver/{}", id)).to_request()).await).await;
  assert!(html.contains("Bianchi Bicicleta"));
  assert!(html.contains("Deporte"));

  let html = body_text(test::call_service(&app, test::TestRequest::get().uri(&format!("/productos/form/{}", id)).to_request()).await).await;
  assert!(html.contains(&format!("value=\"{}\"", id)));
  assert!(html.contains("Editar"));
  assert!(html.contains(" selected"));
}

#[actix_web::test]
async fn test_form_submission_creates_and_redirects() {
  let (state, uploads) = test_state();
  let categoria = saved_categoria(&state, "Electronico").await;
  let categoria_id = categoria.id.clone().unwrap();
  let app = init_app!(state);

  let html = body_text(test::call_service(&app, test::TestRequest::get().uri("/productos/form").to_request()).await).await;
  assert!(html.contains("Electronico"));

  let req = test::TestRequest::post()
    .uri("/productos/form")
    .insert_header((header::CONTENT_TYPE, multipart_content_type()))
    .set_payload(multipart_body(
      &[
        ("id", ""),
        ("nombre", "TV"),
        ("precio", "456.89"),
        ("createdAt", ""),
        ("categoria.id", categoria_id.as_str()),
      ],
      Some(("tv front.png", "tv".as_bytes())),
    ))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
  assert_eq!(location(&resp), "/productos?status=producto+guardado+con+exito");

  let productos = state.catalog.list_all().await.unwrap();
  assert_eq!(productos.len(), 1);
  let foto = productos[0].foto.clone().unwrap();
  assert!(foto.ends_with("-tvfront.png"));
  assert!(uploads.path().join(foto).exists());
}

#[actix_web::test]
async fn test_form_edit_without_new_file_keeps_foto() {
  let (state, _uploads) = test_state();
  let categoria = saved_categoria(&state, "Electronico").await;
  let mut producto = saved_producto(&state, "TV", 1.0, &categoria).await;
  producto.foto = Some("old-tv.png".to_string());
  let producto = state.catalog.save(producto).await.unwrap();
  let id = producto.id.clone().unwrap();
  let categoria_id = categoria.id.clone().unwrap();
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/productos/form")
    .insert_header((header::CONTENT_TYPE, multipart_content_type()))
    .set_payload(multipart_body(
      &[
        ("id", id.as_str()),
        ("nombre", "TV LED"),
        ("precio", "2.5"),
        ("categoria.id", categoria_id.as_str()),
      ],
      Some(("", "".as_bytes())),
    ))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FOUND);

  let updated = state.catalog.get_by_id(&id).await.unwrap().unwrap();
  assert_eq!(updated.nombre, "TV LED");
  assert_eq!(updated.precio, 2.5);
  assert_eq!(updated.foto.as_deref(), Some("old-tv.png"));
  assert_eq!(updated.created_at, producto.created_at);
}

#[actix_web::test]
async fn test_invalid_form_is_rendered_again_with_errors() {
  let (state, _uploads) = test_state();
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/productos/form")
    .insert_header((header::CONTENT_TYPE, multipart_content_type()))
    .set_payload(multipart_body(&[("nombre", "Sin precio")], None))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let html = body_text(resp).await;
  assert!(html.contains("El campo precio no puede ser nulo"));
  assert!(html.contains("value=\"Sin precio\""));
  assert!(state.catalog.list_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_eliminar() {
  let (state, _uploads) = test_state();
  let categoria = saved_categoria(&state, "Muebles").await;
  let producto = saved_producto(&state, "Mica Comoda 5 Cajones", 150.89, &categoria).await;
  let uri = format!("/productos/eliminar/{}", producto.id.unwrap());
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
  assert_eq!(location(&resp), "/productos?status=producto+eliminado+con+exito");
  assert!(state.catalog.list_all().await.unwrap().is_empty());

  let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(location(&resp), "/productos?error=No+existe+el+producto+a+eliminar");
}

#[actix_web::test]
async fn test_foto_download_rejects_unknown_and_escaping_names() {
  let (state, _uploads) = test_state();
  let app = init_app!(state);

  for uri in ["/productos/uploads/img/nope.png", "/productos/uploads/img/..%2Fsecret"] {
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
  }
}
