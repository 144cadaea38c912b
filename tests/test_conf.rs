use anyhow::Result;
use indoc::indoc;
use serde_derive::Serialize;
use std::io;
use yaml_rust2::{Yaml, YamlLoader};
use yamlconf::conf::comment_block;
use yamlconf::describe::{DescriptionTable, NoDescriptions};
use yamlconf::{Document, DumpOptions, Engine, LineBreak, Representer, Tag, YamlConf, YamlFormat};

#[derive(Serialize)]
struct KeyValue {
    key: &'static str,
}

#[derive(Serialize)]
struct A {
    a: u32,
}

#[derive(Serialize, YamlFormat)]
#[yaml(description = "desc")]
struct B {
    b: u32,
}

#[derive(Serialize)]
struct Empty;

#[derive(Serialize)]
struct Server {
    motd: Motd,
    players: Players,
}

#[derive(Serialize)]
struct Motd {
    line: &'static str,
}

#[derive(Serialize)]
struct Players {
    max: u32,
    hidden: bool,
}

fn engine_with(line_break: LineBreak) -> Engine {
    let options = DumpOptions {
        line_break,
        ..DumpOptions::default()
    };
    Engine::new(options, Representer::default())
}

/// Fails every write after `budget` bytes have been accepted.
#[derive(Debug)]
struct FailingWriter {
    written: Vec<u8>,
    budget: usize,
}

impl FailingWriter {
    fn new(budget: usize) -> Self {
        FailingWriter {
            written: Vec::new(),
            budget,
        }
    }
}

impl io::Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dump_without_header() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    assert_eq!(conf.dump(&KeyValue { key: "value" })?, "key: value\n");
    assert_eq!(
        conf.dump_with_header(&[], &KeyValue { key: "value" })?,
        "key: value\n",
    );
    Ok(())
}

#[test]
fn test_dump_with_header() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let yaml = conf.dump_with_header(&["a", "b"], &KeyValue { key: "value" })?;
    assert_eq!(yaml, "# a\n# b\nkey: value\n");
    Ok(())
}

#[test]
fn test_dump_nested() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let server = Server {
        motd: Motd { line: "hello" },
        players: Players {
            max: 20,
            hidden: false,
        },
    };
    let yaml = conf.dump_with_header(&["ServerPing config"], &server)?;
    let expected = indoc! {"
        # ServerPing config
        motd:
          line: hello
        players:
          max: 20
          hidden: false
    "};
    assert_eq!(yaml, expected);
    Ok(())
}

#[test]
fn test_dump_forces_mapping_root() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    assert_eq!(engine.to_string(&Empty)?, "~\n");
    assert_eq!(conf.dump(&Empty)?, "{}\n");
    assert_eq!(conf.dump(&None::<A>)?, "{}\n");

    let err = conf.dump(&5).unwrap_err();
    assert!(err.is_root_mismatch());
    assert_eq!(err.to_string(), "expected !!map at document root, found integer");

    let err = conf.dump(&vec!["a", "b"]).unwrap_err();
    assert_eq!(err.to_string(), "expected !!map at document root, found sequence");
    Ok(())
}

#[test]
fn test_dump_is_repeatable() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let server = Server {
        motd: Motd { line: "hello" },
        players: Players {
            max: 5,
            hidden: true,
        },
    };
    let first = conf.dump_with_header(&["x"], &server)?;
    let second = conf.dump_with_header(&["x"], &server)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_save_returns_writer() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let buffer = conf.save(Vec::new(), &A { a: 1 })?;
    let buffer = conf.save_with_header(buffer, &["second"], &KeyValue { key: "value" })?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "a: 1\n# second\nkey: value\n",
    );
    Ok(())
}

#[test]
fn test_save_into_mutable_reference() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let mut buffer = Vec::new();
    conf.save(&mut buffer, &A { a: 7 })?;
    assert_eq!(buffer, b"a: 7\n");
    Ok(())
}

#[test]
fn test_dump_all_with_header() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let documents: [&dyn Document; 2] = [&A { a: 1 }, &B { b: 2 }];
    let yaml = conf.dump_all_with_header(&["Config v2"], &documents)?;
    assert_eq!(yaml, "# Config v2\n\n--- a: 1\n\n# desc\n--- b: 2\n");
    Ok(())
}

#[test]
fn test_dump_all_without_header() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let documents: [&dyn Document; 2] = [&B { b: 1 }, &A { a: 2 }];
    let yaml = conf.dump_all(&documents)?;
    assert_eq!(yaml, "\n# desc\n--- b: 1\n\n--- a: 2\n");
    Ok(())
}

#[test]
fn test_dump_all_empty() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    assert_eq!(conf.dump_all(&[])?, "");
    assert_eq!(conf.dump_all_with_header(&["only"], &[])?, "# only\n");
    Ok(())
}

#[test]
fn test_dump_all_marker_per_document() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let first = A { a: 1 };
    let second = B { b: 2 };
    let third = KeyValue { key: "value" };
    let documents: [&dyn Document; 4] = [&first, &second, &third, &first];
    let yaml = conf.dump_all(&documents)?;
    assert_eq!(yaml.matches("--- ").count(), documents.len());
    assert_eq!(yaml.matches("# desc\n--- ").count(), 1);
    Ok(())
}

#[test]
fn test_dump_all_has_no_mapping_override() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let documents: [&dyn Document; 2] = [&Empty, &"plain"];
    assert_eq!(conf.dump_all(&documents)?, "\n--- ~\n\n--- plain\n");
    Ok(())
}

#[test]
fn test_dump_all_honors_configured_root() -> Result<()> {
    let options = DumpOptions {
        explicit_root: Some(Tag::Seq),
        ..DumpOptions::default()
    };
    let engine = Engine::new(options, Representer::default());
    let conf = YamlConf::new(&engine);
    let documents: [&dyn Document; 1] = [&Empty];
    assert_eq!(conf.dump_all(&documents)?, "\n--- []\n");

    // The single document path still forces a mapping.
    assert_eq!(conf.dump(&Empty)?, "{}\n");
    assert_eq!(engine.options().explicit_root, Some(Tag::Seq));
    Ok(())
}

#[test]
fn test_explicit_start() -> Result<()> {
    let options = DumpOptions {
        explicit_start: true,
        ..DumpOptions::default()
    };
    let engine = Engine::new(options, Representer::default());
    let conf = YamlConf::new(&engine);
    assert_eq!(
        conf.dump_with_header(&["h"], &A { a: 1 })?,
        "# h\n---\na: 1\n",
    );

    // Multi-document output writes its own markers.
    let documents: [&dyn Document; 1] = [&A { a: 1 }];
    assert_eq!(conf.dump_all(&documents)?, "\n--- a: 1\n");
    Ok(())
}

#[test]
fn test_windows_line_breaks() -> Result<()> {
    let engine = engine_with(LineBreak::Windows);
    let conf = YamlConf::new(&engine);
    let yaml = conf.dump_with_header(&["a", "b"], &Players { max: 3, hidden: true })?;
    assert_eq!(yaml, "# a\r\n# b\r\nmax: 3\r\nhidden: true\r\n");

    let documents: [&dyn Document; 2] = [&A { a: 1 }, &B { b: 2 }];
    let yaml = conf.dump_all_with_header(&["Config v2"], &documents)?;
    assert_eq!(
        yaml,
        "# Config v2\r\n\r\n--- a: 1\r\n\r\n# desc\r\n--- b: 2\r\n",
    );
    Ok(())
}

#[test]
fn test_mac_line_breaks() -> Result<()> {
    let engine = engine_with(LineBreak::Mac);
    let conf = YamlConf::new(&engine);
    let yaml = conf.dump_with_header(&["a"], &Motd { line: "hi" })?;
    assert_eq!(yaml, "# a\rline: hi\r");
    Ok(())
}

#[test]
fn test_comment_block_splits_embedded_breaks() {
    assert_eq!(comment_block(&["a\rb: injected"], "\n"), "# a\n# b: injected\n");
    assert_eq!(comment_block(&["a\r\nb"], "\n"), "# a\n# b\n");
    assert_eq!(comment_block(&["a\nb", "c"], "\r"), "# a\r# b\r# c\r");
    assert_eq!(comment_block(&["a\n\nb"], "\n"), "# a\n# \n# b\n");
}

#[test]
fn test_header_breaks_stay_comments() -> Result<()> {
    let header = ["x\ry: 1", "p\r\nq: 2", "m\nn: 3"];
    for line_break in [LineBreak::Unix, LineBreak::Windows, LineBreak::Mac] {
        let engine = engine_with(line_break);
        let conf = YamlConf::new(&engine);
        let yaml = conf.dump_with_header(&header, &A { a: 1 })?;
        let expected = ["# x", "# y: 1", "# p", "# q: 2", "# m", "# n: 3", "a: 1", ""]
            .join(line_break.as_str());
        assert_eq!(yaml, expected);

        let docs = YamlLoader::load_from_str(&yaml)?;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["a"], Yaml::Integer(1));
        assert_eq!(docs[0].as_hash().map(|hash| hash.len()), Some(1));
    }
    Ok(())
}

#[test]
fn test_description_breaks_stay_comments() -> Result<()> {
    let engine = engine_with(LineBreak::Mac);
    let table = DescriptionTable::new().with::<A, _>(vec!["first\rb: 2"]);
    let conf = YamlConf::with_descriptions(&engine, table);
    let documents: [&dyn Document; 1] = [&A { a: 1 }];
    let yaml = conf.dump_all(&documents)?;
    assert_eq!(yaml, "\r# first\r# b: 2\r--- a: 1\r");
    Ok(())
}

#[test]
fn test_description_table() -> Result<()> {
    let engine = Engine::default();
    let table = DescriptionTable::new()
        .with::<A, _>(vec!["first", "second"])
        .with::<KeyValue, _>(Vec::<String>::new());
    let conf = YamlConf::with_descriptions(&engine, table);
    let documents: [&dyn Document; 3] = [&A { a: 1 }, &KeyValue { key: "k" }, &B { b: 2 }];
    let yaml = conf.dump_all(&documents)?;
    let expected = "\n# first\n# second\n--- a: 1\n\n--- key: k\n\n--- b: 2\n";
    assert_eq!(yaml, expected);
    Ok(())
}

#[test]
fn test_closure_descriptions() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::with_descriptions(&engine, |document: &dyn Document| {
        if document.type_name().ends_with("Motd") {
            Some(vec!["Message of the day".to_owned()])
        } else {
            None
        }
    });
    let documents: [&dyn Document; 2] = [&Motd { line: "hello" }, &A { a: 1 }];
    let yaml = conf.dump_all(&documents)?;
    assert_eq!(yaml, "\n# Message of the day\n--- line: hello\n\n--- a: 1\n");
    Ok(())
}

#[test]
fn test_no_descriptions() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::with_descriptions(&engine, NoDescriptions);
    let documents: [&dyn Document; 1] = [&B { b: 2 }];
    assert_eq!(conf.dump_all(&documents)?, "\n--- b: 2\n");
    Ok(())
}

#[test]
fn test_sink_failure() {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);

    let err = conf
        .save_with_header(FailingWriter::new(0), &["header"], &A { a: 1 })
        .unwrap_err();
    assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::Other));
    assert_eq!(err.to_string(), "failed to write YAML output: disk full");
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "disk full");

    // Failing in the document body, after the header went through.
    let err = conf
        .save_with_header(FailingWriter::new(5), &["ok"], &A { a: 1 })
        .unwrap_err();
    assert!(err.io_error().is_some());
    assert_eq!(engine.options(), &DumpOptions::default());
}

#[test]
fn test_sink_failure_keeps_written_documents() {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let documents: [&dyn Document; 2] = [&A { a: 1 }, &A { a: 2 }];
    let mut writer = FailingWriter::new(10);
    let err = conf.save_all(&mut writer, &documents).unwrap_err();
    assert!(err.io_error().is_some());
    assert_eq!(writer.written, b"\n--- a: 1\n");
}

#[test]
fn test_engine_options_unchanged() -> Result<()> {
    let options = DumpOptions {
        explicit_root: None,
        line_break: LineBreak::Windows,
        ..DumpOptions::default()
    };
    let engine = Engine::new(options.clone(), Representer::default());
    let conf = YamlConf::new(&engine);

    conf.dump(&A { a: 1 })?;
    assert_eq!(engine.options(), &options);

    conf.dump(&1).unwrap_err();
    assert_eq!(engine.options(), &options);

    conf.save(FailingWriter::new(0), &A { a: 1 }).unwrap_err();
    assert_eq!(engine.options(), &options);
    Ok(())
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Engine::default();
    std::thread::scope(|scope| {
        for i in 0..4 {
            let engine = &engine;
            scope.spawn(move || {
                let conf = YamlConf::new(engine);
                for _ in 0..50 {
                    if i % 2 == 0 {
                        assert_eq!(conf.dump(&Empty).unwrap(), "{}\n");
                    } else {
                        assert_eq!(engine.to_string(&Empty).unwrap(), "~\n");
                    }
                }
            });
        }
    });
    assert_eq!(engine.options().explicit_root, None);
}
