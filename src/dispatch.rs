//! Command dispatch
//!
//! Maps each [`Commands`] variant to its single outbound request and to the
//! rendering of the reply. Both matches are exhaustive, so a new command
//! does not compile until it has a request and a renderer.

use std::ffi::OsString;

use crate::app::App;
use crate::cli::commands::hierarchy::Direction;
use crate::cli::{Cli, Commands, ParseError};
use crate::error::{CodeNavResult, UsageError};
use crate::plugin::PluginRequest;

/// The one request `command` sends
pub fn request_for(command: &Commands) -> Result<PluginRequest, UsageError> {
    match command {
        Commands::Status(args) => args.request(),
        Commands::Find(args) => args.request(),
        Commands::Refs(args) => args.request(),
        Commands::Supertypes(args) => args.request(Direction::Supertypes),
        Commands::Subtypes(args) => args.request(Direction::Subtypes),
        Commands::Rename(args) => args.request(),
        Commands::Overview(args) => args.request(),
        Commands::Refresh(args) => args.request(),
    }
}

/// Run one command: build its request, send it once, render the reply
pub fn execute(command: &Commands, app: &App) -> CodeNavResult<Vec<u8>> {
    let request = request_for(command)?;

    tracing::debug!("{}: {}", command.name(), request);

    let body = app.plugin.call(command.name(), &request)?;
    render(command, body, app)
}

/// Parse `args` and run the resulting command against `app`
pub fn invoke<I, T>(args: I, app: &App) -> CodeNavResult<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::parse_args(args) {
        Ok(cli) => cli,
        Err(ParseError::Usage(e)) => return Err(e.into()),
        Err(ParseError::Display(e)) => return Ok(e.to_string().into_bytes()),
    };
    execute(&cli.command, app)
}

fn render(command: &Commands, body: Vec<u8>, app: &App) -> CodeNavResult<Vec<u8>> {
    let ctx = &app.output;
    if ctx.is_json() {
        return Ok(body);
    }

    let body = body.as_slice();
    let text = match command {
        Commands::Status(args) => args.render(body, &app.plugin.base_url()),
        Commands::Find(args) => args.render(body, ctx),
        Commands::Refs(args) => args.render(body, ctx),
        Commands::Supertypes(args) => args.render(Direction::Supertypes, body),
        Commands::Subtypes(args) => args.render(Direction::Subtypes, body),
        Commands::Rename(args) => Ok(args.render()),
        Commands::Overview(args) => args.render(body, ctx),
        Commands::Refresh(args) => Ok(args.render()),
    }?;
    Ok(text.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputContext;
    use crate::error::{CodeNavError, ConnectionError, EXIT_CONNECTION, EXIT_PLUGIN, EXIT_USAGE};
    use crate::models::config::OutputFormat;
    use crate::plugin::testing::RecordingTransport;
    use crate::plugin::{Method, routes};
    use serde_json::{Value, json};

    fn app_with(fake: &RecordingTransport, format: OutputFormat) -> App {
        App::with_transport(Box::new(fake.clone()), OutputContext::new(format, 30))
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["code-nav"];
        argv.extend_from_slice(args);
        Cli::parse_args(argv).unwrap().command
    }

    #[test]
    fn test_request_mapping_table() {
        let table: [(&[&str], Method, &str, Value); 9] = [
            (&["status"], Method::Get, routes::STATUS, json!({})),
            (
                &["find", "UserService", "--depth", "1"],
                Method::Get,
                routes::FIND,
                json!({"name": "UserService", "depth": 1}),
            ),
            (
                &["find", "Foo", "--body", "--deps", "--path", "src/Foo.kt"],
                Method::Get,
                routes::FIND,
                json!({"name": "Foo", "body": true, "deps": true, "path": "src/Foo.kt"}),
            ),
            (&["refs", "Foo"], Method::Get, routes::REFS, json!({"name": "Foo"})),
            (
                &["supertypes", "ArrayList"],
                Method::Get,
                routes::SUPERTYPES,
                json!({"name": "ArrayList"}),
            ),
            (
                &["subtypes", "Shape", "-d", "2"],
                Method::Get,
                routes::SUBTYPES,
                json!({"name": "Shape", "depth": 2}),
            ),
            (
                &["rename", "OldClass", "NewClass"],
                Method::Post,
                routes::RENAME,
                json!({"old": "OldClass", "new": "NewClass"}),
            ),
            (
                &["overview", "src/App.kt"],
                Method::Get,
                routes::OVERVIEW,
                json!({"path": "src/App.kt"}),
            ),
            (
                &["refresh", "src/App.kt"],
                Method::Post,
                routes::REFRESH,
                json!({"path": "src/App.kt"}),
            ),
        ];

        for (args, method, path, params) in table {
            let request = request_for(&parse(args)).unwrap();
            assert_eq!(request.method, method, "{args:?}");
            assert_eq!(request.path, path, "{args:?}");
            assert_eq!(Value::Object(request.params), params, "{args:?}");
        }
    }

    #[test]
    fn test_usage_errors_make_no_calls() {
        let fake = RecordingTransport::replying(200, "{}");
        let app = app_with(&fake, OutputFormat::Text);

        let cases: [&[&str]; 5] = [
            &["code-nav", "frobnicate"],
            &["code-nav", "find"],
            &["code-nav", "rename", "OnlyOld"],
            &["code-nav", "find", "   "],
            &["code-nav", "overview", ""],
        ];
        for argv in cases {
            let err = invoke(argv.iter().copied(), &app).unwrap_err();
            assert!(matches!(err, CodeNavError::Usage(_)), "{argv:?}: {err:?}");
            assert_eq!(err.exit_code(), EXIT_USAGE);
        }
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_connection_refused_reports_once() {
        let fake = RecordingTransport::refusing();
        let app = app_with(&fake, OutputFormat::Text);

        let err = invoke(["code-nav", "find", "UserService"], &app).unwrap_err();

        assert!(matches!(err, CodeNavError::Connection(ConnectionError::Refused { .. })));
        assert_eq!(err.exit_code(), EXIT_CONNECTION);
        assert!(err.to_string().contains("Make sure your IDE is running"));
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn test_timeout_is_connection_error() {
        let fake = RecordingTransport::timing_out();
        let app = app_with(&fake, OutputFormat::Json);

        let err = invoke(["code-nav", "status"], &app).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONNECTION);
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn test_plugin_error_message_unmodified() {
        let raw = r#"{"error":"Symbol not found: Nope"}"#;
        let fake = RecordingTransport::replying(404, raw);
        let app = app_with(&fake, OutputFormat::Text);

        let err = invoke(["code-nav", "refs", "Nope"], &app).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_PLUGIN);
        match err {
            CodeNavError::Plugin(e) => {
                assert_eq!(e.message, raw);
                assert_eq!(e.command, "refs");
            }
            other => panic!("expected plugin error, got {other:?}"),
        }
    }

    #[test]
    fn test_find_scenario_renders_direct_members() {
        let body = r#"{"symbols":[{
            "namePath": "UserService",
            "relativePath": "src/UserService.kt",
            "type": "class",
            "textRange": {"startPos": {"line": 3}},
            "children": [
                {"namePath": "UserService/findById", "relativePath": "src/UserService.kt", "type": "method", "line": 5},
                {"namePath": "UserService/save", "relativePath": "src/UserService.kt", "type": "method", "line": 9}
            ]
        }]}"#;
        let fake = RecordingTransport::replying(200, body);
        let app = app_with(&fake, OutputFormat::Text);

        let out = text(invoke(["code-nav", "find", "UserService", "--depth", "1"], &app).unwrap());

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "/find");
        assert_eq!(
            Value::Object(calls[0].params.clone()),
            json!({"name": "UserService", "depth": 1})
        );

        assert!(out.starts_with("Found 1 symbol(s):"));
        assert!(out.contains("UserService"));
        assert!(out.contains("src/UserService.kt:3"));
        assert!(out.contains("\n  method       findById"));
        assert!(out.contains("\n  method       save"));
    }

    #[test]
    fn test_rename_sent_exactly_once() {
        let fake = RecordingTransport::replying(200, r#"{"status":"ok"}"#);
        let app = app_with(&fake, OutputFormat::Text);

        let out = text(invoke(["code-nav", "rename", "OldClass", "NewClass"], &app).unwrap());

        assert_eq!(out, "Renamed OldClass -> NewClass");
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/rename");
        assert_eq!(
            Value::Object(calls[0].params.clone()),
            json!({"old": "OldClass", "new": "NewClass"})
        );
    }

    #[test]
    fn test_rename_not_repeated_on_error_paths() {
        for fake in [
            RecordingTransport::replying(409, "Conflict: NewClass already exists"),
            RecordingTransport::refusing(),
            RecordingTransport::timing_out(),
        ] {
            let app = app_with(&fake, OutputFormat::Text);
            let err = invoke(["code-nav", "rename", "OldClass", "NewClass"], &app).unwrap_err();
            assert_ne!(err.exit_code(), 0);
            assert_eq!(fake.calls().len(), 1, "{err}");
        }
    }

    #[test]
    fn test_json_format_passes_payload_through() {
        let body = "{\"symbols\": [ {\"namePath\": \"X\"} ]}\n";
        let fake = RecordingTransport::replying(200, body);
        let app = app_with(&fake, OutputFormat::Json);

        let out = invoke(["code-nav", "find", "X"], &app).unwrap();
        assert_eq!(out, body.as_bytes());
    }

    #[test]
    fn test_json_format_keeps_non_utf8_bytes() {
        let body = b"{\"name\":\"caf\xe9\"}".to_vec();
        let fake = RecordingTransport::replying_bytes(200, body.clone());
        let app = app_with(&fake, OutputFormat::Json);

        let out = invoke(["code-nav", "find", "X"], &app).unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn test_text_format_rejects_non_utf8_payload() {
        let fake = RecordingTransport::replying_bytes(200, b"{\"symbols\":[{\"namePath\":\"\xff\"}]}".to_vec());
        let app = app_with(&fake, OutputFormat::Text);

        let err = invoke(["code-nav", "find", "X"], &app).unwrap_err();
        assert!(matches!(err, CodeNavError::InvalidResponse(_)), "{err:?}");
    }

    #[test]
    fn test_text_format_rejects_garbage_payload() {
        let fake = RecordingTransport::replying(200, "<html>oops</html>");
        let app = app_with(&fake, OutputFormat::Text);

        let err = invoke(["code-nav", "overview", "src/A.kt"], &app).unwrap_err();
        assert!(matches!(err, CodeNavError::InvalidResponse(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_status_text_names_target() {
        let fake = RecordingTransport::replying(200, r#"{"projectRoot":"/work/app"}"#);
        let app = app_with(&fake, OutputFormat::Text);

        let out = text(invoke(["code-nav", "status"], &app).unwrap());
        assert!(out.contains("http://127.0.0.1:24226"));
        assert!(out.contains("/work/app"));
    }

    #[test]
    fn test_empty_find_is_not_an_error() {
        let fake = RecordingTransport::replying(200, r#"{"symbols":[]}"#);
        let app = app_with(&fake, OutputFormat::Text);

        let out = text(invoke(["code-nav", "find", "Missing"], &app).unwrap());
        assert_eq!(out, "No symbols found for: Missing");
    }
}
