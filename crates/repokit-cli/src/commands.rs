//! Command handlers. Each one drives the repository support with dynamic
//! path builders over the table named on the command line.

use anyhow::{Context, bail};
use repokit_core::{AnyEntity, PathBuilder, Predicate, Value};
use repokit_db::{LibSqlSession, Record, RepositorySupport};

use crate::cli::{Commands, FilterArgs, SelectArgs};

pub async fn dispatch(
    command: &Commands,
    support: &RepositorySupport<LibSqlSession>,
) -> anyhow::Result<()> {
    match command {
        Commands::Count(args) => println!("{}", count(args, support).await?),
        Commands::Select(args) => {
            for row in select(args, support).await? {
                println!("{}", to_json(&row));
            }
        }
        Commands::Delete(args) => println!("{}", delete(args, support).await?),
    }
    Ok(())
}

async fn count(args: &FilterArgs, support: &RepositorySupport<LibSqlSession>) -> anyhow::Result<u64> {
    let table = support.path_builder_for_table(&args.table)?;
    let mut query = support.from([table.root()]);
    for predicate in filters(&table, &args.eq)? {
        query = query.filter(predicate);
    }
    query
        .count()
        .await
        .with_context(|| format!("failed to count rows of '{}'", args.table))
}

async fn select(
    args: &SelectArgs,
    support: &RepositorySupport<LibSqlSession>,
) -> anyhow::Result<Vec<Record>> {
    let table = support.path_builder_for_table(&args.filter.table)?;
    let mut query = support.from([table.root()]);
    for predicate in filters(&table, &args.filter.eq)? {
        query = query.filter(predicate);
    }
    if let Some(order) = &args.order {
        let (column, descending) = parse_order(order);
        let path = table.try_get::<Value>(column)?;
        query = query.order_by(if descending { path.desc() } else { path.asc() });
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }

    let rows = query
        .fetch()
        .await
        .with_context(|| format!("failed to read rows of '{}'", args.filter.table))?;
    tracing::debug!(rows = rows.len(), "select finished");
    Ok(rows)
}

async fn delete(args: &FilterArgs, support: &RepositorySupport<LibSqlSession>) -> anyhow::Result<u64> {
    let table = support.path_builder_for_table(&args.table)?;
    let predicates = filters(&table, &args.eq)?;
    if predicates.is_empty() {
        bail!("refusing to delete every row of '{}': pass at least one --eq filter", args.table);
    }
    let mut clause = support.delete(table.root());
    for predicate in predicates {
        clause = clause.filter(predicate);
    }
    clause
        .execute()
        .await
        .with_context(|| format!("failed to delete rows of '{}'", args.table))
}

/// Split `column[:desc|:asc]` into the column and whether to sort descending.
fn parse_order(order: &str) -> (&str, bool) {
    match order.rsplit_once(':') {
        Some((column, "desc")) => (column, true),
        Some((column, "asc")) => (column, false),
        _ => (order, false),
    }
}

fn filters(table: &PathBuilder<AnyEntity>, pairs: &[String]) -> anyhow::Result<Vec<Predicate>> {
    pairs
        .iter()
        .map(|pair| {
            let (column, raw) = pair
                .split_once('=')
                .with_context(|| format!("filter '{pair}' is not of the form column=value"))?;
            Ok(table.try_get::<Value>(column)?.eq(parse_value(raw)))
        })
        .collect()
}

/// Interpret a command-line value: integers and reals keep their type,
/// `null` is SQL NULL, anything else is text.
fn parse_value(raw: &str) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(r) = raw.parse::<f64>() {
        return Value::Real(r);
    }
    Value::Text(raw.to_string())
}

fn to_json(row: &Record) -> serde_json::Value {
    let object = row
        .columns()
        .iter()
        .cloned()
        .zip(row.values().iter().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(object)
}
