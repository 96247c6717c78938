#![allow(dead_code)]

use landing_kit::{Document, Element};

pub struct Landing {
    pub document: Document,
    pub slides: Vec<Element>,
    pub dots: Vec<Element>,
    pub prev: Element,
    pub next: Element,
    pub form: Element,
    pub name: Element,
    pub phone: Element,
    pub message: Element,
    pub submit: Element,
    pub status: Element,
}

/// 輪播與聯絡表單；其餘功能元素不放
pub fn landing(slide_count: usize) -> Landing {
    let slides: Vec<Element> = (0..slide_count)
        .map(|_| Element::new("div").with_class("slide"))
        .collect();
    let dots: Vec<Element> = (0..slide_count)
        .map(|i| {
            Element::new("button")
                .with_class("dot")
                .with_attr("data-index", &i.to_string())
        })
        .collect();
    let prev = Element::new("button").with_class("slider__btn prev");
    let next = Element::new("button").with_class("slider__btn next");

    let mut slider = Element::new("section").with_class("slider");
    for slide in &slides {
        slider = slider.with_child(slide.clone());
    }
    slider = slider.with_child(prev.clone()).with_child(next.clone());
    for dot in &dots {
        slider = slider.with_child(dot.clone());
    }

    let name = Element::new("input")
        .with_attr("name", "name")
        .with_attr("required", "");
    let phone = Element::new("input")
        .with_id("phone")
        .with_attr("name", "phone")
        .with_attr("required", "");
    let message = Element::new("textarea")
        .with_attr("name", "message")
        .with_attr("required", "");
    let submit = Element::new("button").with_attr("type", "submit");
    let form = Element::new("form")
        .with_id("contact-form")
        .with_child(name.clone())
        .with_child(phone.clone())
        .with_child(message.clone())
        .with_child(submit.clone());
    let status = Element::new("div").with_id("form-status");

    let root = Element::new("body")
        .with_child(slider)
        .with_child(form.clone())
        .with_child(status.clone());

    Landing {
        document: Document::new(root),
        slides,
        dots,
        prev,
        next,
        form,
        name,
        phone,
        message,
        submit,
        status,
    }
}

pub fn active_slide(landing: &Landing) -> Option<usize> {
    landing.slides.iter().position(|slide| slide.has_class("active"))
}
