pub mod checklist_items;
