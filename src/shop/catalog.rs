use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CatalogItem {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [CatalogItem],
}

#[derive(Debug, Serialize)]
pub struct ServiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

// Sales mini-catalogs shown in the modal on the landing page.
pub const CATALOGS: &[Catalog] = &[
    Catalog {
        id: "toner",
        title: "Venta y Recarga de Tóner",
        items: &[
            CatalogItem {
                name: "Recarga tóner láser (negro)",
                description: "Recarga profesional con prueba de impresión.",
                price: "Desde $120",
            },
            CatalogItem {
                name: "Tóner compatible",
                description: "Alta calidad compatible con equipos comunes.",
                price: "Desde $350",
            },
        ],
    },
    Catalog {
        id: "cartridges",
        title: "Venta y Recarga de Cartuchos",
        items: &[
            CatalogItem {
                name: "Recarga cartucho de tinta",
                description: "Recarga con tinta pigmentada o a base de color según modelo.",
                price: "Desde $50",
            },
            CatalogItem {
                name: "Cartucho remanufacturado",
                description: "Opción económica con buena calidad.",
                price: "Desde $120",
            },
        ],
    },
    Catalog {
        id: "equipment",
        title: "Venta de Equipos de Cómputo",
        items: &[
            CatalogItem {
                name: "Laptop reacondicionada",
                description: "Revisada y con garantía limitada.",
                price: "Desde $5,000",
            },
            CatalogItem {
                name: "PC de escritorio",
                description: "Ensambladas según necesidad (oficina/juegos).",
                price: "Desde $4,500",
            },
        ],
    },
];

pub const SERVICES: &[ServiceOption] = &[
    ServiceOption {
        value: "food",
        label: "Platillos de Pollo (fines de semana)",
    },
    ServiceOption {
        value: "repair",
        label: "Reparación de Computadoras",
    },
    ServiceOption {
        value: "cafe",
        label: "Ciber - Renta de PC y Servicios",
    },
];

pub fn find(id: &str) -> Option<&'static Catalog> {
    CATALOGS.iter().find(|catalog| catalog.id == id)
}
