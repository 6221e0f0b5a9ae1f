// Infrastructure implementations of the analysis ports.

pub mod html_renderer;
pub mod module_locator;
pub mod python_parser;

pub use html_renderer::HtmlMatrixRenderer;
pub use module_locator::SearchPathLocator;
pub use python_parser::TreeSitterPythonParser;
