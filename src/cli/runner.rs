//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::crawler::CrawlerStatus;
use crate::discovery::{export_descriptor, SchemaDiscovery};
use crate::error::Result;
use crate::schema::SchemaDescriptor;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tracing::error;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Connect to AWS and run the CLI command, writing results to stdout
    ///
    /// A client that cannot be built is logged and the run ends cleanly;
    /// only a failure to write output is returned.
    pub async fn run(&self) -> Result<()> {
        let discovery = match SchemaDiscovery::connect(self.cli.discovery_config()).await {
            Ok(discovery) => discovery,
            Err(e) => {
                error!("Error connecting to AWS: {e}");
                return Ok(());
            }
        };
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(&discovery, &mut out).await
    }

    /// Run the CLI command against an existing discovery facade
    pub async fn execute<W: Write>(&self, discovery: &SchemaDiscovery, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::ListNamespaces => {
                let namespaces = discovery.list_namespaces().await;
                self.write_names(out, "NAMESPACES", None, &namespaces)
            }
            Commands::ListDatasets { namespace } => {
                let datasets = discovery.list_datasets(namespace).await;
                self.write_names(out, "DATASETS", Some(namespace.as_str()), &datasets)
            }
            Commands::DiscoverSchema {
                namespace,
                dataset,
                output,
                cloudformation,
            } => {
                let Some(descriptor) = discovery.discover_schema(namespace, dataset).await else {
                    return Ok(());
                };

                self.write_summary(out, &descriptor)?;

                if let Some(path) = output {
                    export(&descriptor, path);
                }

                if *cloudformation {
                    let template = discovery.render_template(&descriptor);
                    self.write_template(out, &template)?;
                }
                Ok(())
            }
            Commands::TriggerCrawler { crawler_name } => {
                let started = discovery.trigger_crawler(crawler_name).await;
                match self.cli.format {
                    OutputFormat::Text => Ok(()),
                    _ => self.write_message(
                        out,
                        &json!({
                            "type": "CRAWLER_START",
                            "crawler": crawler_name,
                            "started": started
                        }),
                    ),
                }
            }
            Commands::CrawlerStatus { crawler_name } => {
                match discovery.crawler_status(crawler_name).await {
                    Some(status) => self.write_status(out, &status),
                    None => Ok(()),
                }
            }
        }
    }

    /// Output a JSON message in the selected format
    fn write_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
            _ => serde_json::to_string(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn write_names<W: Write>(
        &self,
        out: &mut W,
        kind: &str,
        namespace: Option<&str>,
        names: &[String],
    ) -> Result<()> {
        match self.cli.format {
            OutputFormat::Text => {
                for name in names {
                    writeln!(out, "{name}")?;
                }
                Ok(())
            }
            _ => {
                let mut msg = json!({ "type": kind, "names": names });
                if let Some(ns) = namespace {
                    msg["namespace"] = json!(ns);
                }
                self.write_message(out, &msg)
            }
        }
    }

    fn write_summary<W: Write>(&self, out: &mut W, descriptor: &SchemaDescriptor) -> Result<()> {
        match self.cli.format {
            OutputFormat::Text => {
                writeln!(out, "Schema Summary:")?;
                writeln!(out, "   Namespace: {}", descriptor.namespace)?;
                writeln!(out, "   Dataset: {}", descriptor.dataset)?;
                writeln!(out, "   Columns: {}", descriptor.columns.len())?;
                writeln!(out, "   Partitions: {}", descriptor.partitions.len())?;
                writeln!(out, "   Location: {}", descriptor.location)?;
                Ok(())
            }
            _ => self.write_message(out, &json!({ "type": "SCHEMA", "schema": descriptor })),
        }
    }

    fn write_template<W: Write>(&self, out: &mut W, template: &str) -> Result<()> {
        match self.cli.format {
            OutputFormat::Text => {
                writeln!(out)?;
                writeln!(out, "CloudFormation Template:")?;
                writeln!(out, "{template}")?;
                Ok(())
            }
            _ => self.write_message(
                out,
                &json!({ "type": "CLOUDFORMATION", "template": template }),
            ),
        }
    }

    fn write_status<W: Write>(&self, out: &mut W, status: &CrawlerStatus) -> Result<()> {
        match self.cli.format {
            OutputFormat::Text => {
                writeln!(out, "Crawler Status:")?;
                writeln!(out, "   Name: {}", status.name)?;
                writeln!(out, "   State: {}", status.state)?;
                writeln!(out, "   Database: {}", status.database)?;
                if let Some(last) = &status.last_crawl {
                    writeln!(out, "   Last Crawl: {last}")?;
                }
                Ok(())
            }
            _ => self.write_message(
                out,
                &json!({ "type": "CRAWLER_STATUS", "crawlerStatus": status }),
            ),
        }
    }
}

/// Export failures are reported but never end the run
fn export(descriptor: &SchemaDescriptor, path: &Path) {
    if let Err(e) = export_descriptor(descriptor, path) {
        error!("Error exporting schema to {}: {e}", path.display());
    }
}
