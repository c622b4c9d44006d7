use utoipa::OpenApi;
use crate::common::response::{ErrorBody, MessageBody, ValidationErrorBody};
use crate::modules::movie::model::{Genre, Movie, MoviePatch, NewMovie};
use crate::modules::movie::schema::{FieldIssue, IssueCode};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::movie::handler::preflight,
    ),
    components(
        schemas(
            Movie, NewMovie, MoviePatch, Genre,
            FieldIssue, IssueCode,
            MessageBody, ErrorBody, ValidationErrorBody,
        )
    ),
    tags(
        (name = "Movies", description = "In-memory movie catalogue")
    )
)]
pub struct ApiDoc;
