mod authorization;
mod blast_radius;
mod support;
mod taint;
