use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use actix_web::http::header::ContentType;
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use mimic_core::corpus;
use mimic_core::model::MarkovChain;
use mimic_core::options::{ChainArgs, CorpusArgs};
use mimic_core::GenerateError;

/// Sentences generated for a single request.
const SENTENCES_PER_REQUEST: usize = 1000;

/// Page served when nobody with the requested name ever wrote anything.
const UNKNOWN_AUTHOR_PAGE: &str = "<html><body><marquee scrollamount=\"90\">\
	<span style=\"background: red; font-size: 300px; color: white\">\
	WHOOP! WHOOP! ... USER DOES NOT EXIST IN JIRA! ... WHOOP! WHOOP!</span>\
	</marquee></body></html>";

#[derive(Parser)]
#[command(name = "mimic-server", about = "Serve sentences written the way tracker users write")]
struct Cli {
	/// Address to listen on
	#[arg(long, env = "MIMIC_BIND", default_value = "0.0.0.0:49001")]
	bind: String,

	/// Enable verbose debug output
	#[arg(short, long)]
	verbose: bool,

	#[command(flatten)]
	corpus: CorpusArgs,

	#[command(flatten)]
	chain: ChainArgs,
}

/// Query parameters of the generation route.
#[derive(Deserialize)]
struct GenerateParams {
	/// Sentences to generate, capped at `SENTENCES_PER_REQUEST`
	count: Option<usize>,
}

/// Body of a generation request.
#[derive(Debug, PartialEq)]
enum Reply {
	Sentences(String),
	UnknownAuthor(String),
}

/// Generates up to `count` sentences, each followed by a blank line.
///
/// Stops at the first unknown-author result and appends the fallback page.
fn render(chain: &MarkovChain, author: &str, count: usize) -> Result<Reply, GenerateError> {
	let mut body = String::new();

	for _ in 0..count {
		match chain.generate(author) {
			Ok(sentence) => {
				body.push_str(&sentence);
				body.push_str("\n\n");
			}
			Err(GenerateError::UnknownAuthor(_)) => {
				body.push_str(UNKNOWN_AUTHOR_PAGE);
				return Ok(Reply::UnknownAuthor(body));
			}
			Err(e) => return Err(e),
		}
	}

	Ok(Reply::Sentences(body))
}

/// HTTP GET endpoint `/{author}`
///
/// Streams sentences imitating `author`; the root path uses every author.
async fn get_generated(
	chain: web::Data<MarkovChain>,
	author: web::Path<String>,
	query: web::Query<GenerateParams>,
	request: actix_web::HttpRequest,
) -> HttpResponse {
	let author = author.into_inner();
	if author == "favicon.ico" {
		return HttpResponse::Ok().finish();
	}

	let peer = request
		.peer_addr()
		.map(|address| address.to_string())
		.unwrap_or_else(|| "unknown".to_owned());
	log::info!("Request from {peer} for user {author}");

	let count = query.count.unwrap_or(SENTENCES_PER_REQUEST).min(SENTENCES_PER_REQUEST);
	let chain = chain.into_inner();

	match web::block(move || render(&chain, &author, count)).await {
		Ok(Ok(Reply::Sentences(body))) => HttpResponse::Ok().content_type(ContentType::plaintext()).body(body),
		Ok(Ok(Reply::UnknownAuthor(body))) => HttpResponse::Ok().content_type(ContentType::html()).body(body),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e.to_string()),
		Err(_) => HttpResponse::InternalServerError().body("Generation failed"),
	}
}

fn routes(config: &mut web::ServiceConfig) {
	config.route("/{author:.*}", web::get().to(get_generated));
}

fn init_logging(verbose: bool) {
	let filter = if verbose { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

/// Main entry point for the server.
///
/// Loads the corpus and trains the chain before the HTTP runtime starts
/// (fetching uses a blocking client), then shares the trained chain
/// read-only between workers.
fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);
	mimic_core::text::init();

	let config = cli.chain.build_config().context("invalid chain configuration")?;
	let snapshot = cli.corpus.load().context("failed to load the issue corpus")?;
	let chain = corpus::train(&config, corpus::records(&snapshot.issues)).context("training failed")?;
	let chain = web::Data::new(chain);

	log::info!("Listening on http://{}/", cli.bind);

	actix_web::rt::System::new().block_on(async move {
		HttpServer::new(move || {
			App::new()
				.wrap(middleware::Logger::default())
				.app_data(chain.clone())
				.configure(routes)
		})
		.bind(&cli.bind)?
		.run()
		.await
	})?;

	Ok(())
}
