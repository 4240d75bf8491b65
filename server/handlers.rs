use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use metro_graph::models::{LineId, StationId};
use metro_graph::network::{LineRequest, LineUpdateRequest, SectionRequest, StationRequest};
use metro_graph::{PathFindType, SubwayError, SubwayNetwork};
use serde::{Deserialize, Serialize};

/// Core errors translated into client-error responses
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] SubwayError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            SubwayError::NotFound(_) => StatusCode::NOT_FOUND,
            SubwayError::InvalidArgument(_) | SubwayError::Import(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { message: self.0.to_string() })
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionQuery {
    station_id: StationId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    start_station_id: StationId,
    end_station_id: StationId,
    path_find_type: String,
}

fn parse_line_id(raw: &str) -> Result<LineId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(SubwayError::not_found(format!("line {raw}"))))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/stations")
            .route(web::post().to(create_station))
            .route(web::get().to(list_stations)),
    )
    .service(web::resource("/stations/{id}").route(web::delete().to(delete_station)))
    .service(
        web::resource("/lines")
            .route(web::post().to(create_line))
            .route(web::get().to(list_lines)),
    )
    .service(
        web::resource("/lines/{id}")
            .route(web::get().to(get_line))
            .route(web::put().to(update_line))
            .route(web::delete().to(delete_line)),
    )
    .service(
        web::resource("/lines/{id}/sections")
            .route(web::post().to(register_section))
            .route(web::delete().to(delete_section)),
    )
    .service(web::resource("/paths").route(web::get().to(find_shortest_path)));
}

async fn create_station(network: web::Data<SubwayNetwork>, request: web::Json<StationRequest>) -> ApiResult {
    let station = network.create_station(request.into_inner().name)?;
    Ok(HttpResponse::Created().json(station))
}

async fn list_stations(network: web::Data<SubwayNetwork>) -> HttpResponse {
    HttpResponse::Ok().json(network.stations())
}

async fn delete_station(network: web::Data<SubwayNetwork>, id: web::Path<u64>) -> ApiResult {
    network.delete_station(StationId(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

async fn create_line(network: web::Data<SubwayNetwork>, request: web::Json<LineRequest>) -> ApiResult {
    let line = network.create_line(request.into_inner())?;
    Ok(HttpResponse::Created().json(line))
}

async fn list_lines(network: web::Data<SubwayNetwork>) -> HttpResponse {
    HttpResponse::Ok().json(network.lines())
}

async fn get_line(network: web::Data<SubwayNetwork>, id: web::Path<String>) -> ApiResult {
    let line = network.line(parse_line_id(&id)?)?;
    Ok(HttpResponse::Ok().json(line))
}

async fn update_line(
    network: web::Data<SubwayNetwork>,
    id: web::Path<String>,
    request: web::Json<LineUpdateRequest>,
) -> ApiResult {
    network.update_line(parse_line_id(&id)?, request.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}

async fn delete_line(network: web::Data<SubwayNetwork>, id: web::Path<String>) -> ApiResult {
    network.delete_line(parse_line_id(&id)?)?;
    Ok(HttpResponse::NoContent().finish())
}

async fn register_section(
    network: web::Data<SubwayNetwork>,
    id: web::Path<String>,
    request: web::Json<SectionRequest>,
) -> ApiResult {
    let line_id = parse_line_id(&id)?;
    network.register_section(line_id, request.into_inner())?;
    Ok(HttpResponse::Ok().json(network.line(line_id)?))
}

async fn delete_section(
    network: web::Data<SubwayNetwork>,
    id: web::Path<String>,
    query: web::Query<SectionQuery>,
) -> ApiResult {
    network.delete_section(parse_line_id(&id)?, query.station_id)?;
    Ok(HttpResponse::NoContent().finish())
}

async fn find_shortest_path(network: web::Data<SubwayNetwork>, query: web::Query<PathQuery>) -> ApiResult {
    let mode: PathFindType = query.path_find_type.parse()?;
    let path = network.find_shortest_path(query.start_station_id, query.end_station_id, mode)?;
    Ok(HttpResponse::Ok().json(path))
}
