pub mod twobody_vis2d;
