#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

mod alerts;
mod device;
mod keys;
mod ui;

use num_traits::{FromPrimitive, ToPrimitive};
use breath_core::{route, PhaseController, TimerHandle};

use crate::alerts::AlertConfig;
use crate::device::{Device, PumpOp};
use crate::keys::{map_key, KeyCommand};

const SERVER_NAME: &str = "_Breath timer_";
const APP_NAME: &str = "Breath";

const HELP_TEXT: &str = "BREATH TIMER\n\
    0: Deep breath\n\
    1: Exhale & hold, counts up from -30.0\n\
    2: Inhale & hold, counts up from -15.0\n\
    3: Breathe normally\n\
    \n\
    ENTER / arrows: next phase\n\
    r / backspace: back to phase 0\n\
    Buzzes once when a hold reaches +0.0\n\
    F4: quit";

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum AppOp {
    Redraw = 0,
    Rawkeys,
    FocusChange,
    Tick,
    Quit,
}

struct AppState {
    gam: gam::Gam,
    #[allow(dead_code)]
    token: [u32; 4],
    content: gam::Gid,
    screensize: gam::menu::Point,

    controller: PhaseController,
    device: Device,

    allow_redraw: bool,
    help_visible: bool,
    quit: bool,
}

impl AppState {
    fn new(xns: &xous_names::XousNames, sid: xous::SID, pump_sid: xous::SID) -> Self {
        let gam = gam::Gam::new(xns).expect("can't connect to GAM");

        let token = gam
            .register_ux(gam::UxRegistration {
                app_name: String::from(APP_NAME),
                ux_type: gam::UxType::Chat,
                predictor: None,
                listener: sid.to_array(),
                redraw_id: AppOp::Redraw.to_u32().unwrap(),
                gotinput_id: None,
                audioframe_id: None,
                rawkeys_id: Some(AppOp::Rawkeys.to_u32().unwrap()),
                focuschange_id: Some(AppOp::FocusChange.to_u32().unwrap()),
            })
            .expect("couldn't register UX")
            .unwrap();

        let content = gam.request_content_canvas(token).expect("couldn't get canvas");
        let screensize = gam.get_canvas_bounds(content).expect("couldn't get dimensions");

        let llio = llio::Llio::new(xns);
        let pump_conn = xous::connect(pump_sid).expect("can't connect to pump");

        let mut app = Self {
            gam,
            token,
            content,
            screensize,
            controller: PhaseController::new(),
            device: Device::new(llio, AlertConfig::default(), pump_conn),
            allow_redraw: true,
            help_visible: false,
            quit: false,
        };
        app.controller.start(&mut app.device);
        app
    }

    fn redraw(&self) {
        if !self.allow_redraw {
            return;
        }
        if self.help_visible {
            ui::draw_help(&self.gam, self.content, self.screensize, HELP_TEXT);
            return;
        }
        ui::draw_breath(&self.gam, self.content, self.screensize, &self.device.screen);
    }

    fn handle_key(&mut self, key: char) {
        // Any key dismisses help
        if self.help_visible {
            self.help_visible = false;
            self.redraw();
            return;
        }

        match map_key(key) {
            Some(KeyCommand::ToggleHelp) => {
                self.help_visible = true;
            }
            Some(KeyCommand::Quit) => {
                self.quit = true;
                return;
            }
            Some(KeyCommand::Input(event)) => {
                if let Some(action) = route(event) {
                    log::debug!("{:?} -> {:?}", event, action);
                    self.controller.apply(action, &mut self.device);
                }
            }
            None => return,
        }
        self.redraw();
    }

    fn handle_tick(&mut self, handle: TimerHandle) {
        if !self.device.fire(handle) {
            log::trace!("dropping cancelled tick {:?}", handle);
            return;
        }
        self.controller.on_tick(handle, &mut self.device);
        if !self.help_visible {
            self.redraw();
        }
    }

    fn shutdown(&mut self) {
        self.controller.shutdown(&mut self.device);
        self.device.stop_pump();
    }
}

/// Single-shot timer: sleeps for each armed delay and posts the handle back.
fn pump_thread(pump_sid: xous::SID, main_conn: xous::CID) {
    let tt = ticktimer_server::Ticktimer::new().unwrap();

    loop {
        let msg = match xous::receive_message(pump_sid) {
            Ok(msg) => msg,
            Err(e) => {
                log::error!("pump receive failed: {:?}", e);
                break;
            }
        };
        match FromPrimitive::from_usize(msg.body.id()) {
            Some(PumpOp::Arm) => xous::msg_scalar_unpack!(msg, handle, delay_ms, _, _, {
                if delay_ms > 0 {
                    tt.sleep_ms(delay_ms).ok();
                }
                xous::send_message(
                    main_conn,
                    xous::Message::new_scalar(AppOp::Tick.to_usize().unwrap(), handle, 0, 0, 0),
                ).ok();
            }),
            Some(PumpOp::Quit) => break,
            None => log::error!("unknown pump opcode: {:?}", msg),
        }
    }
    xous::destroy_server(pump_sid).ok();
}

fn main() -> ! {
    log_server::init_wait().unwrap();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("Breath timer PID is {}", xous::process::id());

    let xns = xous_names::XousNames::new().unwrap();
    let sid = xns.register_name(SERVER_NAME, None).expect("can't register server");
    let main_conn = xous::connect(sid).expect("can't connect to self");

    let pump_sid = xous::create_server().expect("can't create pump server");
    std::thread::spawn(move || {
        pump_thread(pump_sid, main_conn);
    });

    let mut app = AppState::new(&xns, sid, pump_sid);

    loop {
        let msg = xous::receive_message(sid).unwrap();
        match FromPrimitive::from_usize(msg.body.id()) {
            Some(AppOp::Redraw) => {
                app.redraw();
            }
            Some(AppOp::Rawkeys) => xous::msg_scalar_unpack!(msg, k1, k2, k3, k4, {
                let keys = [
                    core::char::from_u32(k1 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k2 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k3 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k4 as u32).unwrap_or('\u{0000}'),
                ];
                for &key in keys.iter() {
                    if key != '\u{0000}' {
                        app.handle_key(key);
                    }
                }
            }),
            Some(AppOp::FocusChange) => xous::msg_scalar_unpack!(msg, new_state_code, _, _, _, {
                let new_state = gam::FocusState::convert_focus_change(new_state_code);
                match new_state {
                    gam::FocusState::Background => {
                        // Holds keep counting off screen
                        app.allow_redraw = false;
                    }
                    gam::FocusState::Foreground => {
                        app.allow_redraw = true;
                        app.redraw();
                    }
                }
            }),
            Some(AppOp::Tick) => xous::msg_scalar_unpack!(msg, raw, _, _, _, {
                app.handle_tick(TimerHandle::from_raw(raw as u32));
            }),
            Some(AppOp::Quit) => break,
            _ => log::error!("unknown opcode: {:?}", msg),
        }
        if app.quit {
            break;
        }
    }

    // Clean up
    log::info!("Breath timer quitting in {:?}", app.controller.phase());
    app.shutdown();
    xns.unregister_server(sid).unwrap();
    xous::destroy_server(sid).unwrap();
    xous::terminate_process(0)
}
