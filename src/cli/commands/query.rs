use clap::Args;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::query::{ArrayFormat, FilterMap, QueryBuilder, QueryOptions, QueryParams, QuerySort, SortSpec};

/// Paging, search, sort and filter flags shared by the list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    #[arg(long, help = "Zero-based page index")]
    pub page: Option<u32>,

    #[arg(long, help = "Page size")]
    pub size: Option<u32>,

    #[arg(long, help = "Free-text search")]
    pub q: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Sort fields, e.g. 'name,-createdAt' or 'name asc'")]
    pub sort: Option<String>,

    #[arg(
        long = "filter",
        short = 'f',
        help = "Filter as field=value, field[op]=value or field[in]=a,b (repeatable)"
    )]
    pub filters: Vec<String>,
}

impl QueryArgs {
    pub fn to_params(&self) -> anyhow::Result<QueryParams> {
        let sort = match &self.sort {
            Some(s) => QuerySort::parse(s)?,
            None => SortSpec::default(),
        };
        Ok(QueryParams {
            page: self.page,
            size: self.size,
            q: self.q.clone(),
            sort,
            filters: FilterMap::parse_exprs(&self.filters)?,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct QueryCommand {
    #[command(flatten)]
    pub query: QueryArgs,

    #[arg(long, help = "How lists are written: repeat, comma or bracket")]
    pub array_format: Option<ArrayFormat>,

    #[arg(long, help = "Keep null values instead of skipping them")]
    pub keep_null: bool,

    #[arg(long, help = "Keep empty strings instead of skipping them")]
    pub keep_empty: bool,

    #[arg(long, help = "Write values without percent-encoding")]
    pub raw_values: bool,
}

impl QueryCommand {
    /// Configured options with the command-line switches applied.
    pub fn options(&self, base: QueryOptions) -> QueryOptions {
        QueryOptions {
            array_format: self.array_format.unwrap_or(base.array_format),
            skip_null: base.skip_null && !self.keep_null,
            skip_empty_string: base.skip_empty_string && !self.keep_empty,
            encode_values: base.encode_values && !self.raw_values,
        }
    }
}

pub async fn handle(cmd: QueryCommand, output_format: OutputFormat) -> anyhow::Result<()> {
    let params = cmd.query.to_params()?;
    let options = cmd.options(config().query.options);
    let query = QueryBuilder::build(&params, options);

    match output_format {
        OutputFormat::Text => println!("{}", query),
        OutputFormat::Json => output_success(
            &output_format,
            "Query string built",
            Some(serde_json::json!({ "query": query, "options": options })),
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        cmd: QueryCommand,
    }

    fn parse(args: &[&str]) -> QueryCommand {
        Harness::parse_from(std::iter::once("query").chain(args.iter().copied())).cmd
    }

    #[test]
    fn flags_become_query_params() {
        let cmd = parse(&["--page", "0", "--size", "20", "--q", "silva", "--sort", "-createdAt", "-f", "active=true"]);
        let params = cmd.query.to_params().unwrap();
        let query = QueryBuilder::build(&params, cmd.options(QueryOptions::default()));
        assert_eq!(query, "?page=0&size=20&q=silva&sort=-createdAt&active=true");
    }

    #[test]
    fn switches_override_configured_options() {
        let cmd = parse(&["--array-format", "comma", "--keep-null", "--raw-values"]);
        let options = cmd.options(QueryOptions::default());
        assert_eq!(options.array_format, ArrayFormat::Comma);
        assert!(!options.skip_null);
        assert!(options.skip_empty_string);
        assert!(!options.encode_values);
    }

    #[test]
    fn bad_sort_is_reported() {
        let cmd = parse(&["--sort", "name sideways"]);
        assert!(cmd.query.to_params().is_err());
    }
}
