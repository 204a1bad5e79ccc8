//! Output rendering (Markdown summary, path list)

pub mod report;

pub use report::{
    render_markdown, render_path_list, write_collect_outputs, write_output, CollectOutputs,
};
