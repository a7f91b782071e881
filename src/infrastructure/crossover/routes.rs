//! Converts a crossover config into an API description

use std::str::FromStr;

use tracing::{debug, warn};
use url::Url;

use super::model::{CrossoverConfig, RouteConfig};
use crate::conversion::rules::{validate_function_name, validate_topic};
use crate::conversion::{
    ApiDescription, Argument, Arguments, ConversionError, DbMethod, FunctionKind, FunctionType,
};
use crate::core::utils::{query_placeholders, topic_placeholders};

const FUNCTION_ROUTE: &str = "javascript/function";
const DATABASE_ROUTE_PREFIX: &str = "db/";
const PUBLISH_ROUTE: &str = "websockets/pub";
const SUBSCRIBE_ROUTE: &str = "websockets/sub";

/// Build the API description for every supported route, in declaration order
pub fn describe(config: &CrossoverConfig) -> Result<ApiDescription, ConversionError> {
    let mut api = ApiDescription::default();

    if let Some(info) = &config.info {
        if let Some(title) = &info.title {
            api.title = title.clone();
        }
        if let Some(version) = &info.version {
            api.version = version.clone();
        }
        api.description = info.description.clone();
    }

    api.base_url = base_url(config)?;
    api.broker_url = config
        .server
        .websockets
        .as_ref()
        .map(|ws| ws.broker_url());

    for (name, route) in &config.routes {
        validate_function_name(name)?;

        let function = match route.kind.as_str() {
            FUNCTION_ROUTE => function_route(config, name, route),
            kind if kind.starts_with(DATABASE_ROUTE_PREFIX) => database_route(config, name, route)?,
            PUBLISH_ROUTE | SUBSCRIBE_ROUTE => websocket_route(config, name, route)?,
            other => {
                warn!(route = %name, route_type = %other, "Skipping route with unsupported type");
                continue;
            }
        };

        debug!(route = %name, arguments = function.arguments.len(), "Converted route");
        api.functions.push(function);
    }

    Ok(api)
}

fn base_url(config: &CrossoverConfig) -> Result<Option<String>, ConversionError> {
    let configured = config
        .client
        .axios
        .as_ref()
        .and_then(|axios| axios.base_url.clone());

    let Some(base) = configured else {
        return Ok(config
            .server
            .port
            .map(|port| format!("http://localhost:{port}")));
    };

    Url::parse(&base).map_err(|e| {
        ConversionError::load("client.axios.baseURL", format!("invalid URL '{base}': {e}"))
    })?;
    Ok(Some(base))
}

fn params_to_arguments(route: &RouteConfig) -> Arguments {
    route
        .params
        .iter()
        .map(|(name, value)| (name.clone(), Argument::from_param(value)))
        .collect()
}

fn function_route(config: &CrossoverConfig, name: &str, route: &RouteConfig) -> FunctionType {
    let handler = route.function.clone().unwrap_or_else(|| name.to_string());

    let exposed = &config.server.functions;
    if !exposed.is_empty() && !exposed.contains(&handler) {
        warn!(
            route = %name,
            function = %handler,
            "Function is not listed in server.functions"
        );
    }

    FunctionType {
        name: name.to_string(),
        arguments: params_to_arguments(route),
        kind: FunctionKind::Function {
            handler: Some(handler),
        },
        description: route.description.clone(),
    }
}

fn database_route(
    config: &CrossoverConfig,
    name: &str,
    route: &RouteConfig,
) -> Result<FunctionType, ConversionError> {
    let database = config.server.database.as_ref();

    let method = route
        .method
        .as_deref()
        .ok_or_else(|| ConversionError::invalid_route(name, "database route needs a `method`"))?;
    let method = DbMethod::from_str(method).map_err(|e| ConversionError::invalid_route(name, e))?;

    let table = route
        .table
        .clone()
        .or_else(|| database.and_then(|db| db.table.clone()));

    let query = match method {
        DbMethod::Query => {
            let query = route.query.clone().ok_or_else(|| {
                ConversionError::invalid_route(name, "`query` method needs a `query` string")
            })?;
            if query.contains("{table}") && table.is_none() {
                return Err(ConversionError::invalid_route(
                    name,
                    "query uses {table} but no table is configured",
                ));
            }
            Some(query)
        }
        DbMethod::Select | DbMethod::Insert => {
            if table.is_none() {
                return Err(ConversionError::invalid_route(
                    name,
                    format!("{method} needs a table on the route or in server.database"),
                ));
            }
            None
        }
    };

    let arguments = params_to_arguments(route);
    if let Some(query) = &query {
        for binding in query_placeholders(query) {
            if !arguments.contains(&binding) {
                warn!(
                    route = %name,
                    binding = %binding,
                    "Query references a parameter that is not declared in params"
                );
            }
        }
    }

    let engine = database
        .map(|db| db.kind.clone())
        .unwrap_or_else(|| route.kind[DATABASE_ROUTE_PREFIX.len()..].to_string());

    Ok(FunctionType {
        name: name.to_string(),
        arguments,
        kind: FunctionKind::Database {
            engine,
            method,
            table,
            query,
        },
        description: route.description.clone(),
    })
}

fn websocket_route(
    config: &CrossoverConfig,
    name: &str,
    route: &RouteConfig,
) -> Result<FunctionType, ConversionError> {
    let topic = route
        .topic
        .as_deref()
        .ok_or_else(|| ConversionError::invalid_route(name, "websocket route needs a `topic`"))?;
    validate_topic(name, topic)?;

    let arguments: Arguments = topic_placeholders(topic)
        .into_iter()
        .map(|placeholder| (placeholder, Argument::required_string()))
        .collect();

    let full_topic = match &config.server.websockets {
        Some(ws) => ws.full_topic(topic),
        None => {
            warn!(route = %name, "Websocket route without server.websockets configuration");
            format!("/{topic}")
        }
    };

    let kind = if route.kind == PUBLISH_ROUTE {
        FunctionKind::Publish {
            topic: full_topic,
            http: route.http,
        }
    } else {
        FunctionKind::Subscribe { topic: full_topic }
    };

    Ok(FunctionType {
        name: name.to_string(),
        arguments,
        kind,
        description: route.description.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn config(value: serde_json::Value) -> CrossoverConfig {
        serde_json::from_value(value).unwrap()
    }

    fn games_config() -> CrossoverConfig {
        config(json!({
            "server": {
                "port": 4200,
                "functions": ["gameComplete"],
                "websockets": {
                    "protocol": "wss",
                    "host": "broker.emqx.io",
                    "port": 8084,
                    "endpoint": "/mqtt"
                },
                "database": { "type": "sqlite", "table": "games" }
            },
            "client": { "axios": { "baseURL": "http://localhost:4200" } },
            "routes": {
                "gameComplete": {
                    "type": "javascript/function",
                    "function": "gameComplete",
                    "params": { "game_id": null }
                },
                "subGame": { "type": "websockets/sub", "topic": "games/{game_id}" },
                "pubGame": { "type": "websockets/pub", "topic": "games/{game_id}", "http": true },
                "createNewGame": {
                    "type": "db/postgres",
                    "method": "insert",
                    "params": { "name": null, "owner_id": null, "isComplete": false }
                },
                "getGame": {
                    "type": "db/postgres",
                    "method": "query",
                    "query": "SELECT * FROM {table} WHERE id = $id",
                    "params": { "id": null }
                }
            }
        }))
    }

    #[test]
    fn test_describe_games_config() {
        let api = describe(&games_config()).unwrap();

        assert_eq!(api.base_url.as_deref(), Some("http://localhost:4200"));
        assert_eq!(
            api.broker_url.as_deref(),
            Some("wss://broker.emqx.io:8084/mqtt")
        );
        let names: Vec<_> = api.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["gameComplete", "subGame", "pubGame", "createNewGame", "getGame"]
        );
    }

    #[test]
    fn test_function_route_arguments() {
        let api = describe(&games_config()).unwrap();
        let complete = &api.functions[0];

        assert_eq!(
            complete.kind,
            FunctionKind::Function {
                handler: Some("gameComplete".into())
            }
        );
        assert_eq!(complete.arguments.required_names(), vec!["game_id"]);
    }

    #[test]
    fn test_database_routes() {
        let api = describe(&games_config()).unwrap();

        let create = &api.functions[3];
        let FunctionKind::Database {
            engine,
            method,
            table,
            query,
        } = &create.kind
        else {
            panic!("expected database route");
        };
        assert_eq!(engine, "sqlite");
        assert_eq!(*method, DbMethod::Insert);
        assert_eq!(table.as_deref(), Some("games"));
        assert!(query.is_none());
        assert_eq!(create.arguments.required_names(), vec!["name", "owner_id"]);
        assert_eq!(
            create.arguments.get("isComplete").unwrap().default,
            Some(json!(false))
        );

        let get = &api.functions[4];
        assert!(matches!(
            &get.kind,
            FunctionKind::Database { method: DbMethod::Query, query: Some(q), .. } if q.contains("$id")
        ));
    }

    #[test]
    fn test_websocket_routes_use_topic_prefix() {
        let api = describe(&games_config()).unwrap();

        let sub = &api.functions[1];
        assert_eq!(
            sub.kind,
            FunctionKind::Subscribe {
                topic: "/games/{game_id}".into()
            }
        );
        assert_eq!(sub.arguments.required_names(), vec!["game_id"]);

        let publish = &api.functions[2];
        assert!(matches!(publish.kind, FunctionKind::Publish { http: true, .. }));
    }

    #[test]
    fn test_base_url_falls_back_to_server_port() {
        let api = describe(&config(json!({ "server": { "port": 8080 } }))).unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:8080"));

        let api = describe(&config(json!({}))).unwrap();
        assert!(api.base_url.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = describe(&config(json!({
            "client": { "axios": { "baseURL": "not a url" } }
        })))
        .unwrap_err();
        assert!(err.to_string().contains("client.axios.baseURL"));
    }

    #[test]
    fn test_info_overrides_defaults() {
        let api = describe(&config(json!({
            "info": { "title": "Games", "version": "2.1.0", "description": "Game service" }
        })))
        .unwrap();
        assert_eq!(api.title, "Games");
        assert_eq!(api.version, "2.1.0");
        assert_eq!(api.description.as_deref(), Some("Game service"));
    }

    #[test]
    fn test_invalid_database_routes() {
        let missing_method = config(json!({
            "server": { "database": { "type": "sqlite", "table": "games" } },
            "routes": { "listGames": { "type": "db/postgres" } }
        }));
        assert!(matches!(
            describe(&missing_method),
            Err(ConversionError::InvalidRoute { ref route, .. }) if route == "listGames"
        ));

        let unknown_method = config(json!({
            "server": { "database": { "type": "sqlite", "table": "games" } },
            "routes": { "dropGames": { "type": "db/postgres", "method": "drop" } }
        }));
        assert!(
            describe(&unknown_method)
                .unwrap_err()
                .to_string()
                .contains("unknown database method 'drop'")
        );

        let missing_query = config(json!({
            "server": { "database": { "type": "sqlite" } },
            "routes": { "getGame": { "type": "db/postgres", "method": "query" } }
        }));
        assert!(describe(&missing_query).is_err());

        let missing_table = config(json!({
            "routes": { "listGames": { "type": "db/postgres", "method": "select" } }
        }));
        assert!(describe(&missing_table).is_err());
    }

    #[test]
    fn test_route_table_overrides_database_table() {
        let api = describe(&config(json!({
            "server": { "database": { "type": "sqlite", "table": "games" } },
            "routes": { "listPlayers": { "type": "db/sqlite", "method": "select", "table": "players" } }
        })))
        .unwrap();
        assert!(matches!(
            &api.functions[0].kind,
            FunctionKind::Database { table: Some(t), .. } if t == "players"
        ));
    }

    #[test]
    fn test_invalid_route_name() {
        let err = describe(&config(json!({
            "routes": { "game complete": { "type": "javascript/function" } }
        })))
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidRoute { .. }));
    }

    #[test]
    fn test_websocket_route_needs_topic() {
        let err = describe(&config(json!({
            "routes": { "subGame": { "type": "websockets/sub" } }
        })))
        .unwrap_err();
        assert!(err.to_string().contains("needs a `topic`"));
    }

    #[traced_test]
    #[test]
    fn test_unknown_route_type_is_skipped() {
        let api = describe(&config(json!({
            "routes": {
                "streamGames": { "type": "grpc/stream" },
                "ping": { "type": "javascript/function" }
            }
        })))
        .unwrap();

        assert_eq!(api.functions.len(), 1);
        assert_eq!(api.functions[0].name, "ping");
        assert!(logs_contain("Skipping route with unsupported type"));
    }

    #[traced_test]
    #[test]
    fn test_undeclared_query_binding_warns() {
        let api = describe(&config(json!({
            "server": { "database": { "type": "sqlite", "table": "games" } },
            "routes": {
                "updateGameName": {
                    "type": "db/postgres",
                    "method": "query",
                    "query": "UPDATE {table} SET name = $name WHERE id = $id",
                    "params": { "name": null }
                }
            }
        })))
        .unwrap();

        assert_eq!(api.functions.len(), 1);
        assert!(logs_contain("Query references a parameter that is not declared"));
    }
}
