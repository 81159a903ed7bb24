//! OpenAPI document for the REST surface

use super::dto::*;
use super::error::Problem;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PT Scheme Nomenclature API",
        description = "CRUD over activities, PT scheme objects, characteristics, quantities, standards and subcontractors"
    ),
    components(schemas(
        ActivityDto,
        ActivityRequest,
        PtSchemeObjectDto,
        PtSchemeObjectRequest,
        CharacteristicDto,
        CharacteristicRequest,
        QuantityDto,
        QuantityRequest,
        StandardDto,
        StandardRequest,
        SubcontractorDto,
        SubcontractorRequest,
        ErrorMessage,
        Problem,
    ))
)]
pub struct ApiDoc;
