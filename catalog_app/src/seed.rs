// catalog_app/src/seed.rs

//! Startup data: the four demo categories and nine demo products.

use catalogo::{CatalogService, CatalogoResult, Categoria, Producto};
use tracing::{info, instrument};

const CATEGORIAS: [&str; 4] = ["Electronico", "Deporte", "Computacion", "Muebles"];

// (nombre, precio, index into CATEGORIAS)
const PRODUCTOS: [(&str, f64, usize); 9] = [
  ("TV Panasonic Pantalla LCD", 456.89, 0),
  ("Sony Camara HD Digital", 177.89, 0),
  ("Apple iPod", 46.89, 0),
  ("Sony Notebook", 846.89, 2),
  ("Hewlett Packard Multifuncional", 200.89, 2),
  ("Bianchi Bicicleta", 70.89, 1),
  ("HP Notebook Omen 17", 2500.89, 2),
  ("Mica Comoda 5 Cajones", 150.89, 3),
  ("TV Sony Bravia OLED 4K Ultra HD", 2255.89, 0),
];

/// Drops both collections and inserts the demo data again.
#[instrument(name = "seed::reseed", skip(catalog), fields(backend = catalog.backend()))]
pub async fn reseed(catalog: &CatalogService) -> CatalogoResult<()> {
  catalog.clear_all().await?;

  let mut categorias = Vec::with_capacity(CATEGORIAS.len());
  for nombre in CATEGORIAS {
    let categoria = catalog.save_category(Categoria::new(nombre)).await?;
    info!(categoria_id = categoria.id.as_deref().unwrap_or_default(), nombre, "Insert categoria");
    categorias.push(categoria);
  }

  for (nombre, precio, categoria_idx) in PRODUCTOS {
    let producto = catalog
      .save(Producto::new(nombre, precio, categorias[categoria_idx].clone()))
      .await?;
    info!(producto_id = producto.id.as_deref().unwrap_or_default(), nombre, "Insert producto");
  }

  info!(
    categorias = CATEGORIAS.len(),
    productos = PRODUCTOS.len(),
    "Catalogue seeded."
  );
  Ok(())
}
