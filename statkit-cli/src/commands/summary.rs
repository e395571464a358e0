//! Summary command - visits, actions and referrers in one round trip.

use anyhow::{Result, anyhow};
use clap::Args;
use statkit_core::{DateSpec, Period, ReportQuery};
use statkit_fetch::Client;
use statkit_modules::ApiNamespaces;
use tracing::info;

use crate::output::{JsonFormatter, SummaryOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Site ID. Defaults to the profile's default site.
    #[arg(long)]
    pub site: Option<u32>,

    /// Period: day, week, month, year or range.
    #[arg(long, default_value = "day")]
    pub period: Period,

    /// Date: today, yesterday, YYYY-MM-DD, lastN, previousN or a range.
    #[arg(long, default_value = "today")]
    pub date: DateSpec,
}

/// Runs the summary command.
pub async fn run(args: &SummaryArgs, cli: &Cli) -> Result<()> {
    let client = cli.client().await?;
    let summary = fetch_summary(&client, args).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_summary(&summary));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&summary)?);
        }
    }

    Ok(())
}

/// Queues the three reports into one batch and collects the results.
pub async fn fetch_summary(client: &Client, args: &SummaryArgs) -> Result<SummaryOutput> {
    let site = args
        .site
        .or(client.config().default_site)
        .ok_or_else(|| anyhow!("No site given: pass --site or set a default site"))?;
    let query = ReportQuery::new(args.period, args.date).site(site);

    info!(site, period = %args.period, date = %args.date, "Fetching summary");

    let batch = client.batch();
    let (visits, actions, referrers) = {
        let sink = batch.sink();
        (
            sink.visits_summary().get(&query, &[]).await,
            sink.actions().get(&query).await,
            sink.referrers().get_referrer_type(&query).await,
        )
    };
    let results = batch.flush().await?;

    Ok(SummaryOutput {
        site,
        period: args.period.to_string(),
        date: args.date.to_string(),
        visits: results.checked(&visits)?.clone(),
        actions: results.checked(&actions)?.clone(),
        referrers: results.checked(&referrers)?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use statkit_fetch::ClientConfig;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn args(site: Option<u32>) -> SummaryArgs {
        SummaryArgs {
            site,
            period: Period::Week,
            date: DateSpec::Yesterday,
        }
    }

    #[tokio::test]
    async fn test_summary_single_bulk_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("API.getBulkRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"nb_visits": 12, "avg_time_on_site": 75},
                {"nb_pageviews": 40},
                [{"label": "Direct Entry", "nb_visits": 7}]
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::from_endpoint(&format!("{}/", server.uri())).unwrap();
        let summary = fetch_summary(&client, &args(Some(4))).await.unwrap();

        assert_eq!(summary.site, 4);
        assert_eq!(summary.period, "week");
        assert_eq!(summary.date, "yesterday");
        assert_eq!(summary.visits["nb_visits"], 12);
        assert_eq!(summary.actions["nb_pageviews"], 40);
        assert_eq!(summary.referrers[0]["label"], "Direct Entry");
    }

    #[tokio::test]
    async fn test_summary_reports_sub_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"result": "error", "message": "No access"},
                {},
                []
            ])))
            .mount(&server)
            .await;

        let client = Client::from_endpoint(&format!("{}/", server.uri())).unwrap();
        let err = fetch_summary(&client, &args(Some(1))).await.unwrap_err();
        assert!(err.to_string().contains("No access"));
    }

    #[tokio::test]
    async fn test_summary_uses_default_site() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("idSite%3D9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}, []])))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::builder(format!("{}/", server.uri()))
            .default_site(9)
            .build()
            .unwrap();
        let client = Client::new(config).unwrap();
        let summary = fetch_summary(&client, &args(None)).await.unwrap();
        assert_eq!(summary.site, 9);
        assert_eq!(summary.referrers, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_summary_requires_site() {
        let client = Client::from_endpoint("https://stats.example.com/").unwrap();
        assert!(fetch_summary(&client, &args(None)).await.is_err());
    }
}
