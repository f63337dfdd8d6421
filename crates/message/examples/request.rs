use std::error::Error;
use std::io::SeekFrom;

use micro_message::{HttpMessage, Request, Stream, Uri};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let uri: Uri = "HTTPS://User@API.Example.com:443/v1/items/a b?sort=asc#top".parse()?;
    info!(uri = %uri, host = uri.host(), port = ?uri.port(), "parsed uri");

    let request = Request::from_parts(
        "get",
        uri,
        [("Accept", vec!["application/json", "text/plain"]), ("X-Request-Id", vec!["42"])],
        "1.1",
    )?;
    info!(
        method = request.method(),
        target = %request.request_target(),
        host = %request.header_line("host"),
        "built request"
    );

    let body = Stream::memory();
    body.write(br#"{"name":"widget"}"#)?;
    body.seek(SeekFrom::Start(0))?;

    let post = request
        .with_method("post")?
        .with_header("Content-Type", "application/json")?
        .with_added_header("accept", "*/*")?
        .with_body(body);

    for (name, values) in post.headers() {
        info!(name, values = ?values, "header");
    }
    info!(size = ?post.body().size(), body = %post.body().to_string_lossy(), "body");

    let moved = post.with_uri(Uri::parse("http://mirror.example.org:8080/v1/items")?, false);
    info!(host = %moved.header_line("Host"), original_host = %post.header_line("Host"), "moved request");

    let http_request = http::Request::<Stream>::try_from(moved)?;
    info!(method = %http_request.method(), uri = %http_request.uri(), "converted to http::Request");

    Ok(())
}
