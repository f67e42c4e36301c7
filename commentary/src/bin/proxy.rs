use degen_commentary::{CommentaryProxy, ProxyConfig, ProxyReply};
use degen_protocol::{COMMENTARY_PATH, CommentaryRequest, ProxyBody};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};

type Reply = (Status, Json<ProxyBody>);

fn respond(reply: ProxyReply) -> Reply {
    (Status::new(reply.status), Json(reply.body))
}

#[rocket::post("/", data = "<body>")]
async fn degen_response(
    proxy: &State<CommentaryProxy>,
    body: Option<Json<CommentaryRequest>>,
) -> Reply {
    respond(proxy.handle("POST", body.map(Json::into_inner)).await)
}

#[rocket::get("/")]
async fn degen_response_get(proxy: &State<CommentaryProxy>) -> Reply {
    respond(proxy.handle("GET", None).await)
}

#[rocket::launch]
fn rocket() -> Rocket<Build> {
    tracing_subscriber::fmt::init();

    let config = ProxyConfig::from_env();
    if !config.has_api_key() {
        log::warn!("OPENROUTER_API_KEY is not set, every request will be answered with an error");
    }
    log::info!("Starting commentary proxy with {:?}", config);

    let proxy = CommentaryProxy::new(config).expect("Could not build HTTP client");
    rocket::build()
        .manage(proxy)
        .mount(COMMENTARY_PATH, rocket::routes![degen_response, degen_response_get])
}
