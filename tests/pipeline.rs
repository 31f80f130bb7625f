use anyhow::Result;
use ironpipe::testing::*;
use ironpipe::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn assert_unsupported<T: std::fmt::Debug>(result: Result<T>) {
    let err = result.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::UnsupportedComposition { .. })
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn heterogeneous_stages_run_in_order() -> Result<()> {
    let mut p = Pipeline::named("words");
    p.add_fn(|s: String| s.split_whitespace().map(str::to_string).collect::<Vec<_>>())?
        .add(Sort::by_key(|w: &String| w.len()))?
        .add(Reduce::with_initial(String::new(), |acc: String, w: String| acc + &w[..1]))?;

    assert_eq!(p.len(), 3);
    assert_eq!(p.stage_names(), vec!["fn", "sort", "reduce"]);
    let initials: String = p.invoke("delta be cat a".to_string())?;
    assert_eq!(initials, "abcd");
    Ok(())
}

#[test]
fn mismatched_stage_is_rejected_when_added() -> Result<()> {
    let mut p = Pipeline::new();
    p.add(Map::new(|x: &i32| x.to_string()))?;
    assert_unsupported(p.add(Filter::new(|x: &i32| *x > 0)).map(|_| ()));
    // the failed add leaves the pipeline as it was
    assert_eq!(p.len(), 1);
    let out: Vec<String> = p.invoke(vec![1, 2])?;
    assert_eq!(out, vec!["1", "2"]);
    Ok(())
}

#[test]
fn pipe_macro_checks_every_junction() {
    assert_unsupported(pipe![Window::<u8>::new(2)?, Sort::<u8>::new()]);
}

#[test]
fn concat_joins_compatible_pipelines() -> Result<()> {
    let evens = pipe![Filter::new(|x: &u32| x % 2 == 0)]?;
    let sum = pipe![Reduce::with_initial(0u32, |acc: u32, x: u32| acc + x)]?;

    let both = evens.concat(&sum)?;
    assert_eq!(both.invoke::<_, u32>((1..=10).collect::<Vec<u32>>())?, 30);
    assert_eq!((&evens | &sum)?.len(), 2);
    assert_unsupported(&sum | &evens);
    Ok(())
}

#[test]
fn with_leaves_receiver_untouched() -> Result<()> {
    let base = pipe![Map::new(|x: &i32| x * 10)]?;
    let extended = base.with(Take::<i32>::new(1))?;
    assert_eq!(base.len(), 1);
    assert_eq!(extended.len(), 2);
    assert_eq!(base.invoke::<_, Vec<i32>>(vec![1, 2])?, vec![10, 20]);
    assert_collections_equal(&extended.invoke::<_, Vec<i32>>(vec![1, 2])?, &[10]);
    Ok(())
}

#[test]
fn invoke_rejects_wrong_endpoint_types() -> Result<()> {
    let p = pipe![Map::new(|x: &i32| *x as f64)]?;
    for err in [
        p.invoke::<Vec<u8>, Vec<f64>>(vec![1]).unwrap_err(),
        p.invoke::<Vec<i32>, Vec<i32>>(vec![1]).unwrap_err(),
    ] {
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::TypeMismatch { .. })
        ));
    }
    assert_eq!(p.input_type(), Some(TypeTag::of::<Vec<i32>>()));
    assert_eq!(p.output_type(), Some(TypeTag::of::<Vec<f64>>()));
    Ok(())
}

#[test]
fn stage_error_aborts_the_run() -> Result<()> {
    let later = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&later);

    let mut p = Pipeline::new();
    p.add_try_fn(|x: i32| if x >= 0 { Ok(x) } else { Err(anyhow::anyhow!("negative: {x}")) })?
        .add_fn(move |x: i32| {
            seen.fetch_add(1, Ordering::SeqCst);
            x
        })?;

    assert_eq!(p.invoke::<_, i32>(-3).unwrap_err().to_string(), "negative: -3");
    assert_eq!(later.load(Ordering::SeqCst), 0);
    assert_eq!(p.invoke::<_, i32>(4)?, 4);
    assert_eq!(later.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn cache_stage_is_shared_between_clones() -> Result<()> {
    let p = pipe![Cache::with_key(|v: &Vec<i32>| v.len())]?;
    let copy = p.clone();
    assert_eq!(p.invoke::<_, Vec<i32>>(vec![1, 2])?, vec![1, 2]);
    assert_eq!(copy.invoke::<_, Vec<i32>>(vec![8, 9])?, vec![1, 2]);
    Ok(())
}
