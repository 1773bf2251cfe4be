use anyhow::Context;
use itemdex_core::{CardView, Catalog, FilterOptions, Query};
use itemdex_data::{load_catalog, load_failure_message, LoadOptions, DEFAULT_CONFIG_PATH};
use serde::Serialize;
use std::path::PathBuf;
use tiny_http::{Header, Method, Response, Server, StatusCode};

const DEFAULT_ADDR: &str = "127.0.0.1:7879";
const LANG_ENV: &str = "ITEMDEX_LANG";

#[derive(Debug, Clone)]
struct ServerOptions {
    addr: String,
    locale: Option<String>,
    load: LoadOptions,
}

fn parse_server_options(args: &[String]) -> ServerOptions {
    let mut addr = DEFAULT_ADDR.to_string();
    let mut locale = std::env::var(LANG_ENV).ok();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut db_path = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--addr" => {
                if let Some(value) = args.get(idx + 1) {
                    addr = value.clone();
                    idx += 1;
                }
            }
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--config" | "-c" => {
                if let Some(value) = args.get(idx + 1) {
                    config_path = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--db" => {
                if let Some(value) = args.get(idx + 1) {
                    db_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    let mut load = LoadOptions::new(config_path);
    if let Some(path) = db_path {
        load = load.with_db_path(path);
    }
    ServerOptions { addr, locale, load }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_server_options(&args);
    let catalog = match load_catalog(&options.load)
        .with_context(|| format!("load catalog from {}", options.load.config_path.display()))
    {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("{}", load_failure_message(options.locale.as_deref()));
            std::process::exit(1);
        }
    };

    let server = Server::http(options.addr.as_str())
        .map_err(|err| anyhow::anyhow!("start server on {}: {err}", options.addr))?;
    log::info!(
        "itemdex web server on http://{} ({} items)",
        options.addr,
        catalog.len()
    );
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &catalog) {
            log::warn!("request error: {err}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    error: Option<String>,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            ok: true,
            error: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
            data: None,
        }
    }
}

#[derive(Serialize)]
struct ItemsPayload {
    summary: String,
    total: usize,
    matched: usize,
    sort: &'static str,
    items: Vec<CardView>,
}

#[derive(Serialize)]
struct HealthPayload {
    items: usize,
}

fn handle_request(
    request: tiny_http::Request,
    catalog: &Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    log::debug!("{} {}", request.method(), url);
    let (status, body) = route(catalog, request.method(), &url)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header);
    request.respond(response)?;
    Ok(())
}

/// Returns the status code and JSON body for a request; unrouted requests get
/// a 404 carrying an error response.
fn route(catalog: &Catalog, method: &Method, url: &str) -> Result<(u16, Vec<u8>), serde_json::Error> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let body = match (method, path) {
        (&Method::Get, "/api/options") => {
            let options: FilterOptions = catalog.filter_options();
            serde_json::to_vec_pretty(&ApiResponse::ok(options))?
        }
        (&Method::Get, "/api/items") => {
            let (query, sort) = parse_item_query(query);
            serde_json::to_vec_pretty(&ApiResponse::ok(items_payload(catalog, &query, &sort)))?
        }
        (&Method::Get, "/api/config") => {
            serde_json::to_vec_pretty(&ApiResponse::ok(catalog.config()))?
        }
        (&Method::Get, "/api/health") => serde_json::to_vec_pretty(&ApiResponse::ok(
            HealthPayload {
                items: catalog.len(),
            },
        ))?,
        _ => {
            let body = serde_json::to_vec_pretty(&ApiResponse::error("not found"))?;
            return Ok((404, body));
        }
    };
    Ok((200, body))
}

fn items_payload(catalog: &Catalog, query: &Query, sort: &str) -> ItemsPayload {
    let sort = catalog.resolve_sort_key(sort);
    let found = catalog.search(query, sort);
    ItemsPayload {
        summary: catalog.summary(found.len()),
        total: catalog.len(),
        matched: found.len(),
        sort: sort.as_str(),
        items: catalog.cards(&found),
    }
}

/// Builds a query from `keyword`, `hero`, `size`, `tier`, `tags` (comma
/// separated, or repeated `tag`) and `sort` parameters.
fn parse_item_query(raw: &str) -> (Query, String) {
    let mut query = Query::default();
    let mut sort = String::new();
    for (key, value) in parse_params(raw) {
        match key.as_str() {
            "keyword" | "q" => query.keyword = value,
            "hero" => query.hero = Some(value).filter(|value| !value.is_empty()),
            "size" => query.size = Some(value).filter(|value| !value.is_empty()),
            "tier" => query.tier = Some(value).filter(|value| !value.is_empty()),
            "tags" | "tag" => query.tags.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string),
            ),
            "sort" => sort = value,
            _ => {}
        }
    }
    (query, sort)
}

fn parse_params(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'%' if idx + 2 < bytes.len()
                && bytes[idx + 1].is_ascii_hexdigit()
                && bytes[idx + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[idx + 1]) << 4 | hex_value(bytes[idx + 2]));
                idx += 3;
                continue;
            }
            b'+' => out.push(b' '),
            byte => out.push(byte),
        }
        idx += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}
