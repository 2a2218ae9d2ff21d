//! axum render adapter.
//!
//! [`HtmlTemplate`] defers rendering to response-build time, matching axum's
//! [`IntoResponse`] contract: handlers return the value, and a render failure
//! becomes an error response instead of a panic. Minify-on-output is applied
//! on this path via [`TemplateManager::render_bytes`].

use std::io;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tera::Context;

use crate::error::TemplateError;
use crate::manager::TemplateManager;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A named template plus its render context, ready to become a response.
#[derive(Debug)]
pub struct HtmlTemplate {
    manager: Arc<TemplateManager>,
    name: String,
    context: Context,
}

impl HtmlTemplate {
    pub fn new(manager: Arc<TemplateManager>, name: impl Into<String>, context: Context) -> Self {
        Self {
            manager,
            name: name.into(),
            context,
        }
    }
}

impl TemplateManager {
    /// Response-ready render instance for an axum handler.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use axum::response::IntoResponse;
    /// # use template_manager::TemplateManager;
    /// # use tera::Context;
    /// async fn index(manager: Arc<TemplateManager>) -> impl IntoResponse {
    ///     let mut context = Context::new();
    ///     context.insert("name", "World");
    ///     manager.html("main/demo/index.html", context)
    /// }
    /// ```
    pub fn html(self: &Arc<Self>, name: impl Into<String>, context: Context) -> HtmlTemplate {
        HtmlTemplate::new(Arc::clone(self), name, context)
    }
}

impl IntoResponse for HtmlTemplate {
    fn into_response(self) -> Response {
        match self.manager.render_bytes(&self.name, &self.context) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(HTML_CONTENT_TYPE),
                )],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}

impl IntoResponse for TemplateError {
    /// Maps the error taxonomy onto response statuses: a bad name is the
    /// client's fault, a missing backing file means the page does not exist,
    /// everything else is a server-side failure.
    fn into_response(self) -> Response {
        let status = match &self {
            TemplateError::InvalidName { .. } => StatusCode::BAD_REQUEST,
            TemplateError::NotFound { .. } => StatusCode::NOT_FOUND,
            TemplateError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture(minify_on_output: bool) -> (TempDir, Arc<TemplateManager>) {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "context/layout/layout.html",
            "{% include \"content.html\" %}",
        );
        write(dir.path(), "main/page.html", "<p>Hello {{ name }}</p>");
        let manager = Arc::new(TemplateManager::new(TemplateConfig {
            root_dir: dir.path().to_path_buf(),
            minify_on_output,
            verbosity: 0,
            ..TemplateConfig::default()
        }));
        (dir, manager)
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_html_response_sets_content_type() {
        let (_dir, manager) = fixture(false);
        let mut context = Context::new();
        context.insert("name", "World");

        let response = manager.html("main/page.html", context).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            HTML_CONTENT_TYPE
        );
        assert_eq!(body_string(response).await, "<p>Hello World</p>");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let (_dir, manager) = fixture(false);
        let response = manager
            .html("main/absent.html", Context::new())
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_execution_failure_is_server_error() {
        let (_dir, manager) = fixture(false);
        // `name` is unset, so the render fails at execution time.
        let response = manager
            .html("main/page.html", Context::new())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_bad_name_is_bad_request() {
        let (_dir, manager) = fixture(false);
        let response = manager.html("F-> ; ", Context::new()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_minify_on_output_applies_to_response() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "context/layout/layout.html",
            "{% include \"content.html\" %}",
        );
        write(dir.path(), "main/page.html", "<div>\n  <p>hi</p>\n</div>");
        let manager = Arc::new(TemplateManager::new(TemplateConfig {
            root_dir: dir.path().to_path_buf(),
            minify_on_output: true,
            verbosity: 0,
            ..TemplateConfig::default()
        }));

        let response = manager
            .html("main/page.html", Context::new())
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!body_string(response).await.contains('\n'));
    }
}
