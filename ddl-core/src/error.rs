use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocError>;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("SQL 脚本文件不存在: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("无法写入输出文件 {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("正则表达式编译失败: {0}")]
    Pattern(#[from] regex::Error),

    #[error("ZIP 文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("脚本中未找到任何表定义")]
    NoTablesFound,
}

impl DocError {
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_xml_writer_errors_are_io() {
        // quick-xml 的 Writer 写入失败时返回 io::Error
        let mut writer = quick_xml::Writer::new(FailingWriter);
        let err: DocError = writer
            .write_event(quick_xml::events::Event::Empty(
                quick_xml::events::BytesStart::new("w:p"),
            ))
            .unwrap_err()
            .into();
        assert!(matches!(err, DocError::Io(_)));
    }

    #[test]
    fn test_output_write_keeps_path() {
        let err = DocError::output_write(
            "out/dump.docx",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(&err, DocError::OutputWrite { path, .. } if path == Path::new("out/dump.docx")));
        assert!(err.to_string().contains("out/dump.docx"));
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
