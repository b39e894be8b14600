//! Mark-sweep collector.
//!
//! Iterative, not recursive: a mark happens on an explicit worklist, and
//! `Heap::mark` reports whether an object was newly marked so cyclic object
//! graphs (a record holding a list that holds the record) terminate without
//! a visited-set on top of the mark bit.

use crate::alloc::Heap;
use crate::config::GcConfig;
use crate::object::Obj;
use crate::value::Value;

pub struct Gc {
    threshold: usize,
    min_threshold: usize,
}

impl Gc {
    pub fn new(config: GcConfig) -> Self {
        Self { threshold: config.initial_threshold, min_threshold: config.min_threshold }
    }

    pub fn should_collect(&self, heap: &Heap) -> bool {
        heap.bytes_live() >= self.threshold
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Mark everything reachable from `roots`, sweep everything else, and
    /// adapt the next collection threshold from how much was reclaimed.
    pub fn collect(&mut self, heap: &mut Heap, roots: impl IntoIterator<Item = Value>) -> usize {
        let before = heap.bytes_live().max(1);
        heap.unmark_all();

        let mut worklist: Vec<Value> = roots.into_iter().collect();
        while let Some(value) = worklist.pop() {
            let Value::Obj(r) = value else { continue };
            if !heap.mark(r) {
                continue; // already marked: cycle guard
            }
            match heap.get(r) {
                Obj::Array(a) => worklist.extend(a.iter().copied()),
                Obj::List(l) => worklist.extend(l.iter().copied()),
                Obj::Dict(d) => worklist.extend(d.values().flat_map(|(k, v)| [*k, *v])),
                Obj::Record(rec) => worklist.extend(rec.fields.values().copied()),
                Obj::Closure(c) => {
                    worklist.push(Value::Obj(c.func));
                    worklist.extend(c.captured.iter().copied());
                }
                Obj::Fn(f) => worklist.push(Value::Obj(f.module)),
                Obj::Module(m) => {
                    let sub = m.sub.borrow();
                    worklist.extend(sub.globals.values().map(|g| g.value));
                    worklist.extend(sub.interned_values().copied());
                    if let Some(top) = sub.top_fn {
                        worklist.push(Value::Obj(top));
                    }
                }
                Obj::NativeModule(nm) => worklist.extend(nm.members.values().copied()),
                Obj::ForeignFn(ff) => worklist.push(Value::Obj(ff.lib)),
                Obj::BoundMethod(bm) => worklist.push(bm.receiver),
                Obj::Str(_) | Obj::NativeFn(_) | Obj::ForeignLib(_) => {}
            }
        }

        let freed = heap.sweep();
        self.adapt_threshold(before, freed);
        freed
    }

    fn adapt_threshold(&mut self, before: usize, freed: usize) {
        let ratio = freed as f64 / before as f64;
        if ratio < 0.5 {
            self.threshold = self.threshold.saturating_mul(2);
        } else if ratio > 0.75 {
            self.threshold = (self.threshold / 2).max(self.min_threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Obj;

    #[test]
    fn unreachable_objects_are_collected() {
        let mut heap = Heap::new();
        let root = heap.alloc(Obj::Str("kept".into()));
        let _garbage = heap.alloc(Obj::Str("garbage".into()));
        let mut gc = Gc::new(GcConfig::default());
        gc.collect(&mut heap, vec![Value::Obj(root)]);
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn cyclic_list_does_not_hang_the_collector() {
        let mut heap = Heap::new();
        let a = heap.alloc(Obj::List(Vec::new()));
        let b = heap.alloc(Obj::List(vec![Value::Obj(a)]));
        if let Obj::List(items) = heap.get_mut(a) {
            items.push(Value::Obj(b));
        }
        let mut gc = Gc::new(GcConfig::default());
        gc.collect(&mut heap, vec![Value::Obj(a)]);
        assert_eq!(heap.live_count(), 2);
    }

    #[test]
    fn threshold_grows_when_little_is_reclaimed() {
        let mut heap = Heap::new();
        let root = heap.alloc(Obj::Str("kept".into()));
        let mut gc = Gc::new(GcConfig { initial_threshold: 64, min_threshold: 16 });
        let before = gc.threshold();
        gc.collect(&mut heap, vec![Value::Obj(root)]);
        assert!(gc.threshold() >= before);
    }
}
