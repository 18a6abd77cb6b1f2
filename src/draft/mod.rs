//! In-memory course outline draft: a single-writer state container over
//! the two-level module/lesson tree, mutated through [`EditCommand`]s.

mod command;
pub use command::{CoursePatch, EditCommand, LessonPatch, ModulePatch};

mod error;
pub use error::{DraftError, DraftResult};

mod node;
pub use node::{CourseFields, LessonDraft, LessonKind, ModuleDraft, NodeId, UnknownLessonKind};

/// The full in-memory state of one editing session: the course scalar
/// fields plus the module/lesson tree, loaded once and flushed whole on
/// save.
///
/// `apply` either performs the command completely or reports an error
/// and leaves the draft untouched. Transient-flag commands (expand,
/// edit-mode) and in-place reorders never mark the draft dirty, so they
/// cannot cause a spurious save.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    fields: CourseFields,
    modules: Vec<ModuleDraft>,
    next_seq: u64,
    dirty: bool,
}

impl CourseDraft {
    pub fn new(fields: CourseFields, modules: Vec<ModuleDraft>) -> Self {
        Self {
            fields,
            modules,
            next_seq: 1,
            dirty: false,
        }
    }

    pub fn fields(&self) -> &CourseFields {
        &self.fields
    }

    pub fn modules(&self) -> &[ModuleDraft] {
        &self.modules
    }

    pub fn module(&self, id: NodeId) -> Option<&ModuleDraft> {
        self.modules.iter().find(|m| m.id() == id)
    }

    /// Whether the draft holds changes the server has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn apply(&mut self, command: EditCommand) -> DraftResult<()> {
        match command {
            EditCommand::AddModule => {
                let id = self.mint_id();
                self.modules.push(ModuleDraft::new(id));
                self.dirty = true;
            }
            EditCommand::DeleteModule { module } => {
                let at = self
                    .modules
                    .iter()
                    .position(|m| m.id() == module)
                    .ok_or(DraftError::UnknownModule(module))?;
                self.modules.remove(at);
                self.dirty = true;
            }
            EditCommand::UpdateModule { module, patch } => {
                patch.validate()?;
                self.module_mut(module)?.apply_patch(patch);
                self.dirty = true;
            }
            EditCommand::ToggleModuleExpanded { module } => {
                self.module_mut(module)?.toggle_expanded();
            }
            EditCommand::SetModuleEditing { module, editing } => {
                self.module_mut(module)?.set_editing(editing);
            }
            EditCommand::ReorderModules { order } => {
                let changed = reorder_nodes(&mut self.modules, &order, ModuleDraft::id, "module")?;
                self.dirty |= changed;
            }
            EditCommand::AddLesson { module } => {
                let id = self.mint_id();
                self.module_mut(module)?.push_lesson(LessonDraft::new(id));
                self.dirty = true;
            }
            EditCommand::DeleteLesson { module, lesson } => {
                self.module_mut(module)?
                    .remove_lesson(lesson)
                    .ok_or(DraftError::UnknownLesson { module, lesson })?;
                self.dirty = true;
            }
            EditCommand::UpdateLesson {
                module,
                lesson,
                patch,
            } => {
                let target = self
                    .module_mut(module)?
                    .lesson_mut(lesson)
                    .ok_or(DraftError::UnknownLesson { module, lesson })?;
                patch.validate(target.kind())?;
                target.apply_patch(patch);
                self.dirty = true;
            }
            EditCommand::SetLessonEditing {
                module,
                lesson,
                editing,
            } => {
                self.module_mut(module)?
                    .lesson_mut(lesson)
                    .ok_or(DraftError::UnknownLesson { module, lesson })?
                    .set_editing(editing);
            }
            EditCommand::ReorderLessons { module, order } => {
                let lessons = self.module_mut(module)?.lessons_vec_mut();
                let changed = reorder_nodes(lessons, &order, LessonDraft::id, "lesson")?;
                self.dirty |= changed;
            }
            EditCommand::UpdateCourse { patch } => {
                patch.validate()?;
                self.fields.apply_patch(patch);
                self.dirty = true;
            }
        }
        Ok(())
    }

    fn mint_id(&mut self) -> NodeId {
        let id = NodeId::mint(self.next_seq);
        self.next_seq += 1;
        id
    }

    fn module_mut(&mut self, id: NodeId) -> DraftResult<&mut ModuleDraft> {
        self.modules
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or(DraftError::UnknownModule(id))
    }
}

/// Rebuild `nodes` in the order given by `order`, moving the existing
/// values. Returns `false` (and does nothing) when the order is already
/// current; errors without touching `nodes` when `order` is not a
/// permutation of the current ids.
fn reorder_nodes<T>(
    nodes: &mut Vec<T>,
    order: &[NodeId],
    id_of: fn(&T) -> NodeId,
    scope: &'static str,
) -> DraftResult<bool> {
    let current: Vec<NodeId> = nodes.iter().map(|n| id_of(n)).collect();
    if current == order {
        return Ok(false);
    }
    if order.len() != current.len() {
        return Err(DraftError::NotAPermutation { scope });
    }
    // full check up front so a bad order leaves the list untouched
    let mut unseen = current;
    for id in order {
        match unseen.iter().position(|c| c == id) {
            Some(at) => {
                unseen.remove(at);
            }
            None => return Err(DraftError::NotAPermutation { scope }),
        }
    }

    let mut remaining = std::mem::take(nodes);
    for id in order {
        let at = remaining
            .iter()
            .position(|n| id_of(n) == *id)
            .expect("order was verified to be a permutation");
        nodes.push(remaining.remove(at));
    }
    Ok(true)
}
