use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::handlers::ledger::{LedgerItemDto, LedgerMutation};

/// OpenAPI document for the JSON surface. The form flows answer with
/// redirects for the server-rendered pages and are not documented here.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::ledger::list_ledger,
        crate::handlers::ledger::add_to_ledger,
        crate::handlers::ledger::remove_from_ledger,
        crate::handlers::personnel::search_records,
    ),
    components(schemas(LedgerMutation, LedgerItemDto, ErrorResponse)),
    tags(
        (name = "ledger", description = "Additive-quantity inventory ledger"),
        (name = "personnel", description = "Personnel issued-item records")
    ),
    info(
        title = "supply-room-api",
        description = "Inventory service for a unit supply room"
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
