//! Routes served by `plainrouter serve`.
//!
//! | Method | Path      | Reply                                   |
//! |--------|-----------|-----------------------------------------|
//! | GET    | `/hello`  | `Hello World!!!!`                       |
//! | POST   | `/hello`  | the request body, byte for byte         |
//! | GET    | `/health` | `{"status":"ok"}`                       |
//! | GET    | `/params` | query and form parameters as JSON       |

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::router::Router;
use serde_json::json;

pub const GREETING: &str = "Hello World!!!!";

pub fn register_demo_routes(router: &mut Router) -> &mut Router {
    router
        .get("/hello", |_req: &HandlerRequest| GREETING)
        .post("/hello", |req: &HandlerRequest| req.body().to_vec())
        .get("/health", |_req: &HandlerRequest| {
            HandlerResponse::json(200, &json!({ "status": "ok" }))
        })
        .get("/params", |req: &HandlerRequest| {
            HandlerResponse::json(200, &json!(req.params_map()))
        })
}

/// Fresh router holding only the demo routes.
#[must_use]
pub fn demo_router() -> Router {
    let mut router = Router::new();
    register_demo_routes(&mut router);
    router
}
