//! A small arena-backed document tree.
//!
//! Views build detached [`Markup`] values, insert them into a [`Document`]
//! and only then attach listeners to the inserted nodes. Removing a node
//! frees its whole subtree together with every listener registered on it.
//! Freed slots are reused, and each [`NodeId`] carries the generation of its
//! slot, so a stale id stops resolving instead of aliasing a newer node.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

const VOID_TAGS: [&str; 6] = ["img", "source", "input", "br", "meta", "link"];

#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    Element(El),
    Text(String),
}

/// Detached element under construction.
#[derive(Clone, Debug, PartialEq)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Markup>,
}

pub fn el(tag: &str) -> El {
    El {
        tag: tag.to_string(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Markup {
    Markup::Text(value.into())
}

impl El {
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        set_pair(&mut self.attrs, name, value.into());
        self
    }

    /// Boolean attribute, rendered without a value.
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        let joined = match self.attrs.iter().find(|(name, _)| name == "class") {
            Some((_, existing)) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        set_pair(&mut self.attrs, "class", joined);
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<M: Into<Markup>>(mut self, children: impl IntoIterator<Item = M>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Markup::Text(value.into()))
    }
}

impl From<El> for Markup {
    fn from(element: El) -> Self {
        Markup::Element(element)
    }
}

fn set_pair(attrs: &mut Vec<(String, String)>, name: &str, value: String) {
    match attrs.iter_mut().find(|(existing, _)| existing == name) {
        Some(pair) => pair.1 = value,
        None => attrs.push((name.to_string(), value)),
    }
}

/// Media element state mirrored from `HTMLMediaElement`.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    pub paused: bool,
    pub current_time: f64,
    pub metadata_loads: u32,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub playback: Option<Playback>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|existing| existing == class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }
}

#[derive(Clone, Debug)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    Click,
    KeyDown,
    Change,
    Load,
    Error,
    Blur,
    Input,
}

impl EventType {
    fn bubbles(self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Document,
    Node(NodeId),
}

#[derive(Clone, Debug)]
struct Listener<A> {
    id: ListenerId,
    target: Target,
    event: EventType,
    action: Option<A>,
    self_only: bool,
    stop_propagation: bool,
}

/// One listener invocation produced by [`Document::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<A> {
    pub action: A,
    pub target: Option<NodeId>,
    pub current_target: Target,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Clone, Debug)]
pub struct Document<A> {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    listeners: Vec<Listener<A>>,
    next_listener: u64,
    pub scroll_y: u32,
}

impl<A: Clone> Document<A> {
    /// A document whose root element is built from `root`.
    pub fn new(root: El) -> Self {
        let mut document = Document {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            listeners: Vec::new(),
            next_listener: 0,
            scroll_y: 0,
        };
        document.root = document.build(Markup::Element(root), None);
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Slots currently allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `id` is alive and reachable from the root.
    pub fn contains(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.node(current) {
                Some(node) => match node.parent {
                    Some(parent) => current = parent,
                    None => return false,
                },
                None => return false,
            }
        }
    }

    fn build(&mut self, markup: Markup, parent: Option<NodeId>) -> NodeId {
        match markup {
            Markup::Text(value) => self.alloc(Node {
                data: NodeData::Text(value),
                parent,
                children: Vec::new(),
            }),
            Markup::Element(El {
                tag,
                attrs,
                children,
            }) => {
                let playback = (tag == "video").then(|| Playback {
                    paused: !attrs.iter().any(|(name, _)| name == "autoplay"),
                    current_time: 0.0,
                    metadata_loads: 0,
                });
                let id = self.alloc(Node {
                    data: NodeData::Element(Element {
                        tag,
                        attrs,
                        playback,
                    }),
                    parent,
                    children: Vec::new(),
                });
                let child_ids: Vec<NodeId> = children
                    .into_iter()
                    .map(|child| self.build(child, Some(id)))
                    .collect();
                if let Some(node) = self.node_mut(id) {
                    node.children = child_ids;
                }
                id
            }
        }
    }

    pub fn append(&mut self, parent: NodeId, markup: impl Into<Markup>) -> Option<NodeId> {
        self.element(parent)?;
        let id = self.build(markup.into(), Some(parent));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    pub fn insert_after(&mut self, reference: NodeId, markup: impl Into<Markup>) -> Option<NodeId> {
        let parent = self.parent(reference)?;
        let index = self.children(parent).iter().position(|&c| c == reference)?;
        let id = self.build(markup.into(), Some(parent));
        self.node_mut(parent)?.children.insert(index + 1, id);
        Some(id)
    }

    /// Swaps `old` (and its subtree) for freshly built `markup`.
    pub fn replace_with(&mut self, old: NodeId, markup: impl Into<Markup>) -> Option<NodeId> {
        let parent = self.parent(old)?;
        let index = self.children(parent).iter().position(|&c| c == old)?;
        self.free_subtree(old);
        let id = self.build(markup.into(), Some(parent));
        self.node_mut(parent)?.children[index] = id;
        Some(id)
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || self.node(id).is_none() {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.node_mut(parent) {
                node.children.retain(|&child| child != id);
            }
        }
        self.free_subtree(id);
        true
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
    }

    pub fn replace_children<M: Into<Markup>>(
        &mut self,
        id: NodeId,
        markups: impl IntoIterator<Item = M>,
    ) {
        self.clear_children(id);
        for markup in markups {
            self.append(id, markup);
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        self.replace_children(id, [Markup::Text(value.into())]);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut freed = HashSet::new();
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                stack.extend(node.children);
                freed.insert(current);
            }
        }
        if freed.is_empty() {
            return;
        }
        self.listeners.retain(|listener| match listener.target {
            Target::Node(node) => !freed.contains(&node),
            Target::Document => true,
        });
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.node(id) {
            match &node.data {
                NodeData::Text(value) => out.push_str(value),
                NodeData::Element(_) => {
                    for &child in &node.children {
                        self.collect_text(child, out);
                    }
                }
            }
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            set_pair(&mut element.attrs, name, value.into());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attrs.retain(|(existing, _)| existing != name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    /// Adds or removes `class`; `force` pins the outcome like `classList.toggle`.
    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let mut classes: Vec<String> = element.classes().map(str::to_string).collect();
        let present = classes.iter().any(|existing| existing == class);
        let wanted = force.unwrap_or(!present);
        if wanted == present {
            return wanted;
        }
        if wanted {
            classes.push(class.to_string());
        } else {
            classes.retain(|existing| existing != class);
        }
        set_pair(&mut element.attrs, "class", classes.join(" "));
        wanted
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.toggle_class(id, class, Some(true));
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.toggle_class(id, class, Some(false));
    }

    pub fn playback(&self, id: NodeId) -> Option<&Playback> {
        self.element(id)?.playback.as_ref()
    }

    fn playback_mut(&mut self, id: NodeId) -> Option<&mut Playback> {
        self.element_mut(id)?.playback.as_mut()
    }

    /// `HTMLMediaElement.load()`: rewinds and re-requests metadata.
    pub fn load_media(&mut self, id: NodeId) {
        if let Some(playback) = self.playback_mut(id) {
            playback.current_time = 0.0;
            playback.metadata_loads += 1;
        }
    }

    pub fn play(&mut self, id: NodeId) {
        if let Some(playback) = self.playback_mut(id) {
            playback.paused = false;
        }
    }

    pub fn pause(&mut self, id: NodeId) {
        if let Some(playback) = self.playback_mut(id) {
            playback.paused = true;
        }
    }

    pub fn seek(&mut self, id: NodeId, time: f64) {
        if let Some(playback) = self.playback_mut(id) {
            playback.current_time = time;
        }
    }

    /// Attached descendants of `scope` (excluding `scope`) in document order.
    pub fn find_all(&self, scope: NodeId, matches: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(element) = self.element(current) {
                if matches(element) {
                    found.push(current);
                }
                stack.extend(self.children(current).iter().rev().copied());
            }
        }
        found
    }

    pub fn find_first(&self, scope: NodeId, matches: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.find_all(scope, matches).into_iter().next()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if self.attr(self.root, "id") == Some(id) {
            return Some(self.root);
        }
        self.find_first(self.root, |element| element.attr("id") == Some(id))
    }

    fn add_listener(
        &mut self,
        target: Target,
        event: EventType,
        action: Option<A>,
        self_only: bool,
        stop_propagation: bool,
    ) -> Option<ListenerId> {
        if let Target::Node(node) = target {
            if !self.contains(node) {
                return None;
            }
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target,
            event,
            action,
            self_only,
            stop_propagation,
        });
        Some(id)
    }

    /// Registers `action` on an attached node. Returns `None` for detached nodes.
    pub fn listen(&mut self, node: NodeId, event: EventType, action: A) -> Option<ListenerId> {
        self.add_listener(Target::Node(node), event, Some(action), false, false)
    }

    /// Like [`Document::listen`] but only fires when `node` is the event target itself.
    pub fn listen_self(&mut self, node: NodeId, event: EventType, action: A) -> Option<ListenerId> {
        self.add_listener(Target::Node(node), event, Some(action), true, false)
    }

    pub fn stop_propagation(&mut self, node: NodeId, event: EventType) -> Option<ListenerId> {
        self.add_listener(Target::Node(node), event, None, false, true)
    }

    pub fn listen_document(&mut self, event: EventType, action: A) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target: Target::Document,
            event,
            action: Some(action),
            self_only: false,
            stop_propagation: false,
        });
        id
    }

    pub fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| listener.id != id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_on(&self, node: NodeId) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.target == Target::Node(node))
            .count()
    }

    /// Collects the actions an event on `target` triggers, in firing order.
    /// Bubbling events walk up to the root and then reach document listeners.
    pub fn dispatch(&self, event: EventType, target: Option<NodeId>) -> Vec<Fired<A>> {
        let mut path: Vec<Target> = Vec::new();
        if let Some(node) = target {
            if !self.contains(node) {
                return Vec::new();
            }
            let mut current = Some(node);
            while let Some(id) = current {
                path.push(Target::Node(id));
                if !event.bubbles() {
                    break;
                }
                current = self.parent(id);
            }
        }
        if target.is_none() || event.bubbles() {
            path.push(Target::Document);
        }

        let mut fired = Vec::new();
        for current in path {
            let mut stop = false;
            for listener in self
                .listeners
                .iter()
                .filter(|listener| listener.target == current && listener.event == event)
            {
                if listener.self_only && target.map(Target::Node) != Some(current) {
                    continue;
                }
                if let Some(action) = &listener.action {
                    fired.push(Fired {
                        action: action.clone(),
                        target,
                        current_target: current,
                    });
                }
                stop |= listener.stop_propagation;
            }
            if stop {
                break;
            }
        }
        fired
    }

    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(value) => out.push_str(&escape_html(value)),
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document<&'static str> {
        Document::new(
            el("html").child(
                el("body")
                    .id("body")
                    .child(el("ul").id("list").child(el("li").class("item").text("one")))
                    .child(el("div").id("box").child(el("button").id("inner").text("go"))),
            ),
        )
    }

    #[test]
    fn renders_escaped_html() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").unwrap();
        doc.append(list, el("li").attr("data-x", "a\"b").flag("hidden").text("<two>"));
        doc.append(list, el("img").attr("src", "a.png"));
        assert_eq!(
            doc.to_html(list),
            "<ul id=\"list\"><li class=\"item\">one</li>\
             <li data-x=\"a&quot;b\" hidden>&lt;two&gt;</li><img src=\"a.png\"></ul>"
        );
    }

    #[test]
    fn removing_a_subtree_drops_its_listeners() {
        let mut doc = sample();
        let boxed = doc.get_element_by_id("box").unwrap();
        let inner = doc.get_element_by_id("inner").unwrap();
        doc.listen(inner, EventType::Click, "inner").unwrap();
        doc.listen(boxed, EventType::Click, "box").unwrap();
        assert_eq!(doc.listener_count(), 2);

        doc.clear_children(boxed);
        assert_eq!(doc.listener_count(), 1);
        assert!(!doc.contains(inner));
        assert!(doc.listen(inner, EventType::Click, "late").is_none());
    }

    #[test]
    fn clicks_bubble_until_stopped() {
        let mut doc = sample();
        let body = doc.get_element_by_id("body").unwrap();
        let boxed = doc.get_element_by_id("box").unwrap();
        let inner = doc.get_element_by_id("inner").unwrap();
        doc.listen(inner, EventType::Click, "inner");
        doc.listen(body, EventType::Click, "body");
        doc.listen_self(boxed, EventType::Click, "box-self");
        doc.listen_document(EventType::Click, "document");

        let actions: Vec<_> = doc
            .dispatch(EventType::Click, Some(inner))
            .into_iter()
            .map(|fired| fired.action)
            .collect();
        assert_eq!(actions, vec!["inner", "body", "document"]);

        doc.stop_propagation(boxed, EventType::Click);
        let actions: Vec<_> = doc
            .dispatch(EventType::Click, Some(inner))
            .into_iter()
            .map(|fired| fired.action)
            .collect();
        assert_eq!(actions, vec!["inner"]);

        let actions: Vec<_> = doc
            .dispatch(EventType::Click, Some(boxed))
            .into_iter()
            .map(|fired| fired.action)
            .collect();
        assert_eq!(actions, vec!["box-self"]);
    }

    #[test]
    fn toggles_classes_like_class_list() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").unwrap();
        assert!(doc.toggle_class(list, "open", None));
        assert!(doc.has_class(list, "open"));
        assert!(!doc.toggle_class(list, "open", None));
        assert!(doc.toggle_class(list, "open", Some(true)));
        assert!(doc.toggle_class(list, "open", Some(true)));
        doc.remove_class(list, "open");
        assert_eq!(doc.attr(list, "class"), Some(""));
    }

    #[test]
    fn replace_and_insert_keep_sibling_order() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").unwrap();
        let first = doc.children(list)[0];
        let second = doc.insert_after(first, el("li").text("two")).unwrap();
        let replaced = doc.replace_with(first, el("li").text("uno")).unwrap();
        assert_eq!(doc.children(list), &[replaced, second]);
        assert_eq!(doc.text_content(list), "unotwo");
        assert!(!doc.contains(first));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut doc = sample();
        let body = doc.get_element_by_id("body").unwrap();
        doc.clear_children(body);
        let start = doc.capacity();
        for _ in 0..10_000 {
            doc.replace_children(body, [el("div").child(el("p").text("x"))]);
        }
        assert!(doc.capacity() <= start + 3);
        assert_eq!(doc.text_content(body), "x");
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").unwrap();
        let first = doc.append(list, el("li").class("old")).unwrap();
        doc.listen(first, EventType::Click, "first").unwrap();
        assert!(doc.remove(first));

        let second = doc.append(list, el("li").class("fresh")).unwrap();
        assert_eq!(second.index, first.index);
        assert_ne!(second, first);
        assert!(!doc.contains(first));
        assert!(doc.element(first).is_none());
        assert!(!doc.remove(first));
        assert!(doc.dispatch(EventType::Click, Some(second)).is_empty());
        doc.set_attr(first, "data-stale", "1");
        assert_eq!(doc.attr(second, "data-stale"), None);
    }

    #[test]
    fn videos_track_playback() {
        let mut doc = sample();
        let body = doc.get_element_by_id("body").unwrap();
        let video = doc.append(body, el("video").flag("autoplay")).unwrap();
        assert_eq!(doc.playback(video).map(|p| p.paused), Some(false));
        doc.seek(video, 12.5);
        doc.pause(video);
        doc.load_media(video);
        let playback = doc.playback(video).unwrap();
        assert!(playback.paused);
        assert_eq!(playback.current_time, 0.0);
        assert_eq!(playback.metadata_loads, 1);
    }
}
