use anyhow::Result;
use flare::testing::*;
use flare::{DataOp, ExecMode, FlareError, Runner, SourceConfig, TextFileOp, WorkerContext};
use std::fs;

fn words(line: String) -> Vec<String> {
    line.split(' ').map(String::from).collect()
}

#[test]
fn three_letter_words_end_to_end() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    assert_eq!(fixture.size()?, 29);

    let mut op = TextFileOp::new(WorkerContext::new(0, 1)?, fixture.path())?
        .flat_map(words)
        .filter(|w: &String| w.len() == 3);
    op.open()?;
    let mut out = Vec::new();
    while let Some(w) = op.next()? {
        out.push(w);
    }
    assert_collections_equal(&out, &["one".to_string(), "two".to_string()]);
    Ok(())
}

#[test]
fn map_changes_type_across_a_file_chain() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    let lengths = TextFileOp::new(WorkerContext::single(), fixture.path())?
        .map(|l: String| l.len())
        .map(|n: usize| -(n as i64))
        .collect_vec()?;
    assert_collections_equal(&lengths, &[-8, -8, -10]);
    Ok(())
}

#[test]
fn sequential_runner_keeps_partition_order() -> Result<()> {
    let fixture = TextFixture::numbered(300)?;
    let per_worker = Runner::sequential().run_collect(fixture.path(), 4, |src| src)?;
    assert_eq!(per_worker.len(), 4);
    let flat: Vec<String> = per_worker.into_iter().flatten().collect();
    assert_collections_equal(&flat, &fixture.lines()?);
    Ok(())
}

#[test]
fn parallel_runner_matches_sequential() -> Result<()> {
    let fixture = TextFixture::numbered(1_000)?;
    let build = |src: TextFileOp| {
        src.flat_map(words)
            .filter(|w: &String| w.starts_with('x'))
            .map(|w: String| w.len())
    };
    let seq = Runner::sequential().run_collect(fixture.path(), 6, build)?;
    let par = Runner::parallel(Some(3)).run_collect(fixture.path(), 6, build)?;
    assert_eq!(seq, par);
    assert!(seq.iter().any(|part| !part.is_empty()));
    Ok(())
}

#[test]
fn runner_flatten_reproduces_file() -> Result<()> {
    let fixture = TextFixture::numbered(123)?;
    let runner = Runner::default();
    assert!(matches!(runner.mode, ExecMode::Parallel { threads: None }));
    let lines = runner.run_flatten(fixture.path(), 5, |src| src)?;
    assert_collections_equal(&lines, &fixture.lines()?);
    Ok(())
}

#[test]
fn runner_rejects_zero_degree() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    let err = Runner::sequential()
        .run_collect(fixture.path(), 0, |src| src)
        .unwrap_err();
    assert!(matches!(err, FlareError::InvalidPartitionCount));
    Ok(())
}

#[test]
fn runner_refuses_degree_it_cannot_hold() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    for runner in [Runner::sequential(), Runner::parallel(Some(2))] {
        let err = runner
            .run_collect(fixture.path(), usize::MAX, |src| src)
            .unwrap_err();
        assert!(matches!(err, FlareError::Runner(_)), "{:?}: {err}", runner.mode);
    }
    Ok(())
}

#[test]
fn runner_reports_lowest_failing_worker() -> Result<()> {
    // worker 0 reads the first two lines, worker 1 the last one
    let fixture = TextFixture::new(b"fine line\n\xff\n\xfe tail\n".as_slice())?;
    for runner in [Runner::sequential(), Runner::parallel(Some(2))] {
        let err = runner
            .run_collect(fixture.path(), 2, |src| src)
            .unwrap_err();
        assert!(
            matches!(err, FlareError::InvalidUtf8 { offset: 10, .. }),
            "{:?}: {err}",
            runner.mode
        );
    }
    Ok(())
}

#[test]
fn runner_surfaces_chain_errors() -> Result<()> {
    let fixture = TextFixture::new(b"fine\n\xc3\x28\nfine\n".as_slice())?;
    let err = Runner::parallel(Some(2))
        .run_flatten(fixture.path(), 1, |src| src)
        .unwrap_err();
    assert!(matches!(err, FlareError::InvalidUtf8 { offset: 5, .. }));
    Ok(())
}

#[test]
fn config_file_builds_the_worker_source() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    let cfg_path = fixture.path().with_file_name("source.json");
    let cfg = SourceConfig::new(fixture.path())
        .with_parallel_degree(2)
        .with_worker_id(1);
    fs::write(&cfg_path, serde_json::to_string(&cfg)?)?;

    let loaded = SourceConfig::from_json_file(&cfg_path)?;
    assert_eq!(loaded, cfg);
    let lines = loaded.open_source()?.collect_vec()?;
    assert_collections_equal(&lines, &["line three".to_string()]);
    Ok(())
}

#[test]
fn config_with_bad_worker_fails_before_reading() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    let cfg = SourceConfig::new(fixture.path())
        .with_parallel_degree(2)
        .with_worker_id(2);
    assert!(matches!(
        cfg.open_source(),
        Err(FlareError::WorkerOutOfRange { .. })
    ));
    Ok(())
}

#[test]
fn config_with_huge_degree_opens_first_worker() -> Result<()> {
    let fixture = TextFixture::new(SAMPLE_TEXT)?;
    let cfg = SourceConfig::new(fixture.path()).with_parallel_degree(usize::MAX);
    let src = cfg.open_source()?;
    assert_eq!(src.partitions().len(), usize::MAX);
    let lines = src.collect_vec()?;
    assert_collections_equal(&lines, &["line one", "line two"].map(String::from));
    Ok(())
}

#[test]
fn config_file_missing_is_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = SourceConfig::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, FlareError::Io { .. }));
    Ok(())
}
