use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::entities::personnel_record;
use crate::errors::ServiceError;
use crate::handlers::parse_quantity;
use crate::services::personnel::NewRecord;
use crate::taxonomy::CategoryGroup;
use crate::{AppState, ListPage};

/// Route and field configuration for one uniform group. The five groups
/// share one handler set parameterized by this profile instead of five
/// copies of the same add/list/delete triple.
#[derive(Debug)]
pub struct GroupProfile {
    pub group: CategoryGroup,
    pub title: &'static str,
    /// GET: group list for the renderer
    pub list_path: &'static str,
    /// POST: urlencoded add form, redirects back to the list
    pub add_path: &'static str,
    /// POST: `{delete_prefix}/{id}`
    pub delete_prefix: &'static str,
}

/// The five uniform groups, with the paths the legacy forms post to.
pub const GROUP_PROFILES: &[GroupProfile] = &[
    GroupProfile {
        group: CategoryGroup::Pt,
        title: "PT Uniforms",
        list_path: "/pt-uniforms",
        add_path: "/pt-uniforms/add",
        delete_prefix: "/pt-uniforms/delete",
    },
    GroupProfile {
        group: CategoryGroup::Ocp,
        title: "OCP Uniforms",
        list_path: "/inventory/ocp",
        add_path: "/inventory/ocp/add",
        delete_prefix: "/inventory/ocp/delete",
    },
    GroupProfile {
        group: CategoryGroup::Blues,
        title: "Blue Uniforms",
        list_path: "/blues",
        add_path: "/inventory/blues/add",
        delete_prefix: "/inventory/blues/delete",
    },
    GroupProfile {
        group: CategoryGroup::FlightSuits,
        title: "Flight Suits",
        list_path: "/flight-suits",
        add_path: "/flight/add",
        delete_prefix: "/inventory/flight-suits/delete",
    },
    GroupProfile {
        group: CategoryGroup::Cadets,
        title: "Cadets Names",
        list_path: "/cadets",
        add_path: "/cadets/add",
        delete_prefix: "/cadets/delete",
    },
];

/// Urlencoded add form. Counts arrive as text and are parsed explicitly so
/// a bad number reports as a validation failure.
#[derive(Debug, Deserialize)]
pub struct AddRecordForm {
    pub name: String,
    pub quantity: String,
    pub category: String,
    pub size: Option<String>,
    pub ranks: Option<String>,
    pub ribbons: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

pub fn routes() -> Router<AppState> {
    let mut router = Router::new().route("/inventory/search", get(search_records));
    for profile in GROUP_PROFILES {
        router = router
            .route(
                profile.list_path,
                get(move |state: State<AppState>| list_group(state, profile)),
            )
            .route(
                profile.add_path,
                post(move |state: State<AppState>, form: axum::Form<AddRecordForm>| {
                    add_record(state, profile, form)
                }),
            )
            .route(
                &format!("{}/{{id}}", profile.delete_prefix),
                post(move |state: State<AppState>, path: Path<String>| {
                    delete_record(state, profile, path)
                }),
            );
    }
    router
}

async fn list_group(
    State(state): State<AppState>,
    profile: &'static GroupProfile,
) -> Result<Json<ListPage<personnel_record::Model>>, ServiceError> {
    let records = state.services.personnel.list_group(profile.group).await?;
    Ok(Json(ListPage {
        title: profile.title.to_string(),
        records,
    }))
}

async fn add_record(
    State(state): State<AppState>,
    profile: &'static GroupProfile,
    axum::Form(form): axum::Form<AddRecordForm>,
) -> Result<Redirect, ServiceError> {
    let ribbons = form
        .ribbons
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(parse_quantity)
        .transpose()?;

    let record = NewRecord {
        name: form.name,
        quantity: parse_quantity(&form.quantity)?,
        category: form.category,
        size: form.size,
        ranks: form.ranks,
        ribbons,
    };

    state.services.personnel.create(profile.group, record).await?;
    Ok(Redirect::to(profile.list_path))
}

async fn delete_record(
    State(state): State<AppState>,
    profile: &'static GroupProfile,
    Path(id): Path<String>,
) -> Result<Redirect, ServiceError> {
    state.services.personnel.delete(&id).await?;
    Ok(Redirect::to(profile.list_path))
}

/// Case-insensitive personnel search by name, returned as structured data.
#[utoipa::path(
    get,
    path = "/inventory/search",
    params(("name" = String, Query, description = "Name substring to match")),
    responses(
        (status = 200, description = "Matching personnel records"),
        (status = 400, description = "Missing name parameter", body = crate::errors::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "personnel"
)]
pub async fn search_records(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<personnel_record::Model>>, ServiceError> {
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ServiceError::ValidationError("name query parameter is required".into()))?;

    let records = state.services.personnel.search(name).await?;
    Ok(Json(records))
}
