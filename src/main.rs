use clap::{Parser, Subcommand};
use folio::output::{self, DocumentStatus};
use folio::{config, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content core for a personal portfolio site")]
#[command(long_about = "\
Content core for a personal portfolio site

Certificates are the union of a curated list in config.toml and whatever
image files sit in the certificates directory. Long-form pages are markup
documents with a YAML front matter header.

Site structure:

  site/
  ├── config.toml                      # Site config (optional)
  ├── public/
  │   └── certificates/                # Discovered certificates (.png .jpg .jpeg .webp .avif)
  │       └── aws.png
  └── src/data/journey/
      └── journey.mdx                  # Document: ---front matter--- + markup body

Curated entries win over discovered files with the same path and keep their
declaration order; discovered files follow in filename order.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the merged certificate collection
    Certificates {
        /// Emit JSON instead of the text listing
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered HTML body of one document
    Render {
        /// Document name, e.g. "journey"
        name: String,
    },
    /// Generate the certificates gallery and document pages
    Build,
    /// Validate config, certificates and documents without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Certificates { json } => {
            let site_config = config::load_config(&cli.source)?;
            let certificates = generate::collect_certificates(&cli.source, &site_config);
            if json {
                println!("{}", serde_json::to_string_pretty(&certificates)?);
            } else {
                output::print_certificates_output(&certificates, &site_config.curated);
            }
        }
        Command::Render { name } => {
            let site_config = config::load_config(&cli.source)?;
            let store = generate::document_store(&cli.source, &site_config);
            let Some(doc) = store.load(&name) else {
                return Err(format!(
                    "document '{}' not found in {}",
                    name,
                    store.root().display()
                )
                .into());
            };
            let body = generate::markup_renderer(&site_config).render_markup(&doc.content);
            println!("{}", body.into_string());
        }
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;

            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &site_config)?;
            output::print_generate_output(&report, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;

            let certificates = generate::collect_certificates(&cli.source, &site_config);
            output::print_certificates_output(&certificates, &site_config.curated);

            let store = generate::document_store(&cli.source, &site_config);
            let renderer = generate::markup_renderer(&site_config);
            let loaded: Vec<_> = site_config
                .documents
                .pages
                .iter()
                .map(|name| {
                    let path = store.path_for(name).unwrap_or_else(|| store.root().join(name));
                    let doc = store.load(name);
                    let body = doc.as_ref().map(|d| renderer.render_markup(&d.content));
                    (name.as_str(), path, doc, body)
                })
                .collect();
            let statuses: Vec<DocumentStatus<'_>> = loaded
                .iter()
                .map(|(name, path, doc, body)| DocumentStatus {
                    name,
                    path,
                    loaded: doc.as_ref().zip(body.as_ref()),
                })
                .collect();
            output::print_documents_output(&statuses);

            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
