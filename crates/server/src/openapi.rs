use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::agents::healthz,
        crate::routes::agents::create,
        crate::routes::agents::list,
        crate::routes::agents::get,
        crate::routes::agents::update,
        crate::routes::agents::delete,
    ),
    components(
        schemas(
            crate::routes::agents::CreateAgentInput,
            crate::routes::agents::UpdateAgentInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "agents")
    )
)]
pub struct AgentsApiDoc;
