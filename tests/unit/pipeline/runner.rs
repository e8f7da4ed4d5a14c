use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::assets::fonts::FontBook;
use crate::assets::loader::MemoryImageLoader;
use crate::foundation::core::{Rect, Rgba8};
use crate::subject::Member;

fn fixture() -> (Surface, Member, MemoryImageLoader) {
    (
        Surface::new(20, 20, FontBook::default()).unwrap(),
        Member::new("x", "unused", 3),
        MemoryImageLoader::new(),
    )
}

#[tokio::test]
async fn steps_run_in_order_and_share_state() {
    let (mut surface, member, loader) = fixture();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let log = Rc::clone(&log);
        Module::from_fn(move |s, _| {
            log.borrow_mut().push(1);
            s.set_fill_color(Rgba8::rgb(0, 0, 255));
            Ok(())
        })
    };
    let second = {
        let log = Rc::clone(&log);
        Module::from_fn(move |s, _| {
            log.borrow_mut().push(2);
            assert_eq!(s.fill_color(), Rgba8::rgb(0, 0, 255));
            s.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
            Ok(())
        })
    };

    let mut pipeline = Pipeline::new([first, second]);
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert_eq!(pipeline.len(), 2);
    pipeline.run(&mut surface, &member, &loader).await.unwrap();
    assert_eq!(pipeline.state(), PipelineState::Done);
    assert_eq!(*log.borrow(), [1, 2]);
    assert_eq!(surface.snapshot().unwrap().pixel(5, 5), Some([0, 0, 255, 255]));

    assert!(pipeline.run(&mut surface, &member, &loader).await.is_err());
}

#[tokio::test]
async fn invalid_name_fails_after_earlier_draws() {
    let (mut surface, member, loader) = fixture();
    let paint = Module::from_fn(|s, _| {
        s.set_fill_color(Rgba8::WHITE);
        s.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        Ok(())
    });
    let never = Module::from_fn(|_, _| panic!("step after an invalid module ran"));

    let mut pipeline = Pipeline::new([paint, Module::from("sparkles"), never]);
    let err = pipeline.run(&mut surface, &member, &loader).await.unwrap_err();

    assert!(matches!(err, CardError::InvalidModule(ref n) if n == "sparkles"));
    assert_eq!(err.to_string(), "`sparkles` is not a valid module");
    assert_eq!(pipeline.state(), PipelineState::Failed { step: 1 });
    assert_eq!(
        surface.snapshot().unwrap().pixel(10, 10),
        Some([255, 255, 255, 255])
    );
}

#[tokio::test]
async fn empty_pipeline_is_done() {
    let (mut surface, member, loader) = fixture();
    let mut pipeline = Pipeline::new(Vec::<Module>::new());
    assert!(pipeline.is_empty());
    pipeline.run(&mut surface, &member, &loader).await.unwrap();
    assert_eq!(pipeline.state(), PipelineState::Done);
}

#[tokio::test]
async fn run_modules_propagates_step_errors() {
    let (mut surface, member, loader) = fixture();
    let failing = Module::from_fn(|_, _| Err(CardError::render("boom")));
    let err = run_modules([Module::from("welcomeText"), failing], &mut surface, &member, &loader)
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::Render(ref m) if m == "boom"));
}
