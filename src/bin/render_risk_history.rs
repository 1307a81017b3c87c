#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "risk_history.png";
#[cfg(feature = "cairo-backend")]
const DEFAULT_WIDTH: u32 = 640;
#[cfg(feature = "cairo-backend")]
const DEFAULT_HEIGHT: u32 = 260;

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    user_id: String,
    output_path: PathBuf,
    width: u32,
    height: u32,
    base_url: Option<String>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = riskview::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use riskview::core::Viewport;
    use riskview::render::CairoRenderer;
    use riskview::{ApiClient, DashboardConfig, RiskChart};

    let args = parse_args()?;
    let mut config = DashboardConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(base_url) = args.base_url {
        config = config.with_api_base_url(base_url);
        config.validate().map_err(|err| err.to_string())?;
    }

    let client = ApiClient::from_config(&config).map_err(|err| err.to_string())?;
    let chart = RiskChart::new(config.chart.clone()).map_err(|err| err.to_string())?;

    // Single-threaded: one request, then one render.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;

    let reachability = runtime.block_on(client.health());
    if !reachability.reachable {
        return Err(format!("API offline: {}", reachability.message));
    }
    let history = runtime
        .block_on(client.risk_history(&args.user_id))
        .map_err(|err| err.reason())?;

    let width = i32::try_from(args.width).map_err(|_| "width is too large".to_owned())?;
    let height = i32::try_from(args.height).map_err(|_| "height is too large".to_owned())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    chart
        .render(&mut renderer, &history, Viewport::new(args.width, args.height))
        .map_err(|err| err.to_string())?;
    renderer
        .write_png(&args.output_path)
        .map_err(|err| err.to_string())?;

    let span = match (
        history.first().and_then(|point| point.parsed_timestamp()),
        history.last().and_then(|point| point.parsed_timestamp()),
    ) {
        (Some(first), Some(last)) => format!(" from {first} to {last}"),
        _ => String::new(),
    };
    println!(
        "wrote {} point(s){span} for `{}` to {}",
        history.len(),
        args.user_id,
        args.output_path.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut user_id = None;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut base_url = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--user" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --user".to_owned())?;
                user_id = Some(value);
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--width" => width = parse_dimension("--width", args.next())?,
            "--height" => height = parse_dimension("--height", args.next())?,
            "--base-url" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --base-url".to_owned())?;
                base_url = Some(value);
            }
            "--help" | "-h" => {
                println!(
                    "usage: render_risk_history --user <id> [--output <png>] [--width <px>] [--height <px>] [--base-url <url>]"
                );
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(CliArgs {
        user_id: user_id.ok_or_else(|| "--user is required".to_owned())?,
        output_path,
        width,
        height,
        base_url,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_dimension(flag: &str, value: Option<String>) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    match value.parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(format!("{flag} must be a positive integer, got `{value}`")),
    }
}
